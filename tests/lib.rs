//! Shared fixtures for the roster behavior tests.

pub mod support;
