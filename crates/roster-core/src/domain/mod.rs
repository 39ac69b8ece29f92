//! Employee domain models.
//!
//! [`Employee`] is the normalized read model, [`EmployeeRecord`] its upstream wire
//! shape, and [`EmployeeCreateRequest`] / [`NewEmployee`] the unvalidated and
//! validated creation payloads.

pub mod employee;

pub use employee::{
    DeleteEmployeeRequest, Employee, EmployeeCreateRequest, EmployeeRecord, NewEmployee, MAX_AGE,
    MIN_AGE,
};
