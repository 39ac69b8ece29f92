use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const MIN_AGE: i64 = 16;
pub const MAX_AGE: i64 = 75;

/// Employee record as republished by this service.
///
/// Reads never re-validate `age`: pre-existing upstream records may fall outside the
/// range enforced on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub salary: u64,
    pub age: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Employee record in the upstream wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmployeeRecord {
    pub id: String,
    #[serde(rename = "employee_name")]
    pub name: String,
    #[serde(rename = "employee_salary")]
    pub salary: u64,
    #[serde(rename = "employee_age")]
    pub age: i64,
    #[serde(rename = "employee_title", default)]
    pub title: String,
    #[serde(rename = "employee_email", default)]
    pub email: Option<String>,
}

impl From<EmployeeRecord> for Employee {
    fn from(record: EmployeeRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            salary: record.salary,
            age: record.age,
            title: record.title,
            email: record.email,
        }
    }
}

/// Caller-supplied creation payload, bound leniently so every violation can be reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeCreateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub salary: Option<i64>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl EmployeeCreateRequest {
    pub fn new(name: impl Into<String>, salary: i64, age: i64, title: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            salary: Some(salary),
            age: Some(age),
            title: Some(title.into()),
        }
    }

    /// Checks every field constraint and yields the payload to submit upstream.
    ///
    /// All violations are collected into one `InvalidInput` message.
    pub fn validate(&self) -> Result<NewEmployee, DomainError> {
        let mut violations = Vec::new();

        let name = non_blank(self.name.as_deref());
        if name.is_none() {
            violations.push("name must not be blank");
        }

        let salary = match self.salary {
            None => {
                violations.push("salary is required");
                None
            }
            Some(value) => match u64::try_from(value) {
                Ok(salary) => Some(salary),
                Err(_) => {
                    violations.push("salary must not be negative");
                    None
                }
            },
        };

        let age = match self.age {
            None => {
                violations.push("age is required");
                None
            }
            Some(value) if value < MIN_AGE => {
                violations.push("age must be at least 16");
                None
            }
            Some(value) if value > MAX_AGE => {
                violations.push("age must be at most 75");
                None
            }
            Some(value) => Some(value),
        };

        let title = non_blank(self.title.as_deref());
        if title.is_none() {
            violations.push("title must not be blank");
        }

        match (name, salary, age, title) {
            (Some(name), Some(salary), Some(age), Some(title)) => Ok(NewEmployee {
                name: name.to_owned(),
                salary,
                age,
                title: title.to_owned(),
            }),
            _ => Err(DomainError::invalid_input(violations.join(", "))),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Validated creation payload; serializes to the upstream `POST` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewEmployee {
    pub name: String,
    pub salary: u64,
    pub age: i64,
    pub title: String,
}

/// Upstream deletion payload; the upstream keys deletion on the display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteEmployeeRequest<'a> {
    pub id: &'a str,
    pub name: &'a str,
}
