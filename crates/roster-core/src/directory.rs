//! Public directory operations.
//!
//! Search and aggregate views are folds over one fresh `list_all` call; nothing is
//! cached between calls. Errors from the upstream client pass through unchanged.

use std::sync::Arc;

use crate::domain::{Employee, EmployeeCreateRequest};
use crate::error::DomainError;
use crate::upstream::EmployeeUpstream;

pub const DEFAULT_TOP_EARNERS: usize = 10;

#[derive(Clone)]
pub struct DirectoryService {
    upstream: Arc<dyn EmployeeUpstream>,
}

impl DirectoryService {
    pub fn new(upstream: Arc<dyn EmployeeUpstream>) -> Self {
        Self { upstream }
    }

    pub async fn list_all(&self) -> Result<Vec<Employee>, DomainError> {
        tracing::info!("fetching all employees");
        let employees = self.upstream.list_all().await?;
        tracing::debug!(count = employees.len(), "fetched employees");
        Ok(employees)
    }

    /// Employees whose name contains `fragment`, ignoring case.
    ///
    /// A blank fragment is rejected before any upstream call.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<Employee>, DomainError> {
        if fragment.trim().is_empty() {
            return Err(DomainError::invalid_input("search string must not be blank"));
        }

        tracing::info!(fragment, "searching employees by name");
        let employees = self.upstream.list_all().await?;
        let matches = filter_by_name(employees, fragment);
        tracing::debug!(fragment, count = matches.len(), "search complete");
        Ok(matches)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Employee, DomainError> {
        tracing::info!(id, "fetching employee by id");
        let employee = self.upstream.get_by_id(id).await?;
        tracing::debug!(id, "fetched employee");
        Ok(employee)
    }

    /// Highest salary in the directory; `0` for an empty directory.
    pub async fn highest_salary(&self) -> Result<u64, DomainError> {
        tracing::info!("calculating highest salary");
        let employees = self.upstream.list_all().await?;
        if employees.is_empty() {
            tracing::warn!("no employees found to calculate highest salary");
        }
        Ok(highest_salary(&employees))
    }

    pub async fn top_earning_names(&self, limit: usize) -> Result<Vec<String>, DomainError> {
        tracing::info!(limit, "fetching top earning employee names");
        let employees = self.upstream.list_all().await?;
        let names = top_earning_names(employees, limit);
        tracing::debug!(count = names.len(), "resolved top earners");
        Ok(names)
    }

    /// Validates locally, then creates upstream. Validation failures never reach the network.
    pub async fn create(&self, request: &EmployeeCreateRequest) -> Result<Employee, DomainError> {
        let payload = request.validate()?;
        tracing::info!(name = %payload.name, "creating employee");
        let employee = self.upstream.create(&payload).await?;
        tracing::debug!(id = %employee.id, "created employee");
        Ok(employee)
    }

    /// Resolves the employee's name, deletes by id and name, and returns the name.
    ///
    /// The lookup and the deletion are separate upstream round trips.
    pub async fn delete_by_id(&self, id: &str) -> Result<String, DomainError> {
        tracing::info!(id, "deleting employee");
        let employee = self.upstream.get_by_id(id).await?;

        if !self.upstream.delete(id, &employee.name).await? {
            return Err(DomainError::not_found(format!(
                "employee named '{}' was not deleted upstream",
                employee.name
            )));
        }

        tracing::debug!(id, name = %employee.name, "deleted employee");
        Ok(employee.name)
    }
}

pub fn filter_by_name(employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    let needle = fragment.to_lowercase();
    employees
        .into_iter()
        .filter(|employee| employee.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn highest_salary(employees: &[Employee]) -> u64 {
    employees
        .iter()
        .map(|employee| employee.salary)
        .max()
        .unwrap_or(0)
}

/// Names by descending salary; ties keep upstream order.
pub fn top_earning_names(mut employees: Vec<Employee>, limit: usize) -> Vec<String> {
    employees.sort_by(|left, right| right.salary.cmp(&left.salary));
    employees
        .into_iter()
        .take(limit)
        .map(|employee| employee.name)
        .collect()
}
