//! Scripted upstream bodies and pre-wired clients.

use std::sync::Arc;
use std::time::Duration;

use roster_core::{
    DirectoryService, HttpEmployeeUpstream, RetryPolicy, ScriptedHttpClient, UpstreamConfig,
};

pub const BASE_URL: &str = "http://directory.test/api/v1/employee";
pub const RAY_ID: &str = "4a3a170b-22cd-4ac2-aad1-9bb5b34a1507";

pub fn record(id: &str, name: &str, salary: u64, age: i64, title: &str) -> String {
    format!(
        r#"{{"id":"{id}","employee_name":"{name}","employee_salary":{salary},"employee_age":{age},"employee_title":"{title}","employee_email":"{}@company.com"}}"#,
        name.to_lowercase()
    )
}

pub fn success(data: &str) -> String {
    format!(r#"{{"data":{data},"status":"Successfully processed request."}}"#)
}

pub fn list(records: &[String]) -> String {
    success(&format!("[{}]", records.join(",")))
}

pub fn sample_directory() -> String {
    list(&[
        record("95f2e8a4-49e9-4e21-b1e2-10075394e1bb", "John Doe", 50_000, 30, "Engineer"),
        record("0b5a4c2d-8f41-4a3e-9f0e-6d1b2c3a4e5f", "Jane Ray", 60_000, 28, "Manager"),
        record(RAY_ID, "Ray", 55_000, 81, "Founder"),
    ])
}

pub fn config(max_attempts: u32) -> UpstreamConfig {
    UpstreamConfig::new(BASE_URL)
        .expect("test base url is valid")
        .with_retry(RetryPolicy::fixed(Duration::ZERO, max_attempts))
}

pub fn upstream(client: &ScriptedHttpClient, max_attempts: u32) -> HttpEmployeeUpstream {
    HttpEmployeeUpstream::new(Arc::new(client.clone()), &config(max_attempts))
}

pub fn directory(client: &ScriptedHttpClient) -> DirectoryService {
    DirectoryService::new(Arc::new(upstream(client, 3)))
}
