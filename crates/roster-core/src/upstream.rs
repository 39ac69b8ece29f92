//! Transport operations against the upstream employee collection.
//!
//! # Operations
//!
//! | Operation | Wire call | Result |
//! |-----------|-----------|--------|
//! | [`list_all`](EmployeeUpstream::list_all) | `GET {base}` | every employee, possibly none |
//! | [`get_by_id`](EmployeeUpstream::get_by_id) | `GET {base}/{id}` | one employee |
//! | [`create`](EmployeeUpstream::create) | `POST {base}` with `{name, salary, age, title}` | created employee |
//! | [`delete`](EmployeeUpstream::delete) | `DELETE {base}` with `{id, name}` | upstream success flag |
//!
//! Each call runs under the [`RetryExecutor`]; each attempt's failure is classified
//! before the retry decision is made.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::classify::UpstreamTarget;
use crate::config::UpstreamConfig;
use crate::domain::{DeleteEmployeeRequest, Employee, EmployeeRecord, NewEmployee};
use crate::envelope::{self, Decoded};
use crate::error::{DomainError, UpstreamFailure};
use crate::http_client::{HttpClient, HttpRequest, HttpResponse};
use crate::retry::RetryExecutor;
use crate::throttling::OutboundThrottle;

/// Upstream client contract consumed by the directory service.
pub trait EmployeeUpstream: Send + Sync {
    /// Fetches the whole collection; an empty collection is not a failure.
    fn list_all<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Employee>, DomainError>> + Send + 'a>>;

    /// Fetches one employee. `NotFound` only for an explicit upstream 404.
    fn get_by_id<'a>(
        &'a self,
        id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Employee, DomainError>> + Send + 'a>>;

    /// Submits an already validated creation payload.
    fn create<'a>(
        &'a self,
        employee: &'a NewEmployee,
    ) -> Pin<Box<dyn Future<Output = Result<Employee, DomainError>> + Send + 'a>>;

    /// Deletes by id and current display name; both are part of the upstream payload.
    fn delete<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, DomainError>> + Send + 'a>>;
}

/// [`EmployeeUpstream`] over HTTP.
#[derive(Clone)]
pub struct HttpEmployeeUpstream {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
    retry: RetryExecutor,
    throttle: Option<OutboundThrottle>,
}

impl HttpEmployeeUpstream {
    pub fn new(http_client: Arc<dyn HttpClient>, config: &UpstreamConfig) -> Self {
        Self {
            http_client,
            base_url: config.base_url().to_owned(),
            timeout_ms: config.timeout_ms,
            retry: RetryExecutor::new(config.retry.clone()),
            throttle: config.rate_limit_per_minute.map(OutboundThrottle::per_minute),
        }
    }

    /// Replaces the retry executor, e.g. to attach an observer.
    pub fn with_retry_executor(mut self, retry: RetryExecutor) -> Self {
        self.retry = retry;
        self
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id))
    }

    /// One attempt: throttle, send, and reject non-2xx statuses.
    async fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, UpstreamFailure> {
        if let Some(throttle) = &self.throttle {
            throttle.acquire().await;
        }

        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(%method, %url, "upstream request");

        let response = self
            .http_client
            .execute(request.with_timeout_ms(self.timeout_ms))
            .await
            .map_err(UpstreamFailure::Transport)?;

        tracing::debug!(%method, %url, status = response.status, "upstream response");

        if !response.is_success() {
            return Err(UpstreamFailure::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    /// One attempt that also decodes the envelope payload.
    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        request: HttpRequest,
    ) -> Result<Option<T>, UpstreamFailure> {
        let response = self.exchange(request).await?;
        payload(response)
    }
}

/// Decodes the envelope of an accepted response.
fn payload<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>, UpstreamFailure> {
    match envelope::decode::<T>(&response.body) {
        Ok(Decoded::Success(data)) => Ok(data),
        Ok(Decoded::Failure(_)) => Err(UpstreamFailure::Status {
            status: response.status,
            body: response.body,
        }),
        Err(error) => Err(UpstreamFailure::Malformed {
            status: response.status,
            detail: error.detail().to_owned(),
        }),
    }
}

impl EmployeeUpstream for HttpEmployeeUpstream {
    fn list_all<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Employee>, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let records = self
                .retry
                .execute("list", &UpstreamTarget::Collection, || {
                    self.fetch::<Vec<EmployeeRecord>>(HttpRequest::get(&self.base_url))
                })
                .await?;

            Ok(records
                .unwrap_or_default()
                .into_iter()
                .map(Employee::from)
                .collect())
        })
    }

    fn get_by_id<'a>(
        &'a self,
        id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Employee, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let target = UpstreamTarget::Id(id.to_owned());
            let url = self.item_url(id);
            let record = self
                .retry
                .execute("get", &target, || async {
                    self.fetch::<EmployeeRecord>(HttpRequest::get(&url))
                        .await?
                        .ok_or(UpstreamFailure::MissingPayload { operation: "get" })
                })
                .await?;

            Ok(Employee::from(record))
        })
    }

    fn create<'a>(
        &'a self,
        employee: &'a NewEmployee,
    ) -> Pin<Box<dyn Future<Output = Result<Employee, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::to_string(employee)
                .map_err(|error| DomainError::unknown(format!("failed to encode employee: {error}")))?;
            let target = UpstreamTarget::Name(employee.name.clone());
            let record = self
                .retry
                .execute("create", &target, || async {
                    self.fetch::<EmployeeRecord>(HttpRequest::post(&self.base_url).with_json_body(body.clone()))
                        .await?
                        .ok_or(UpstreamFailure::MissingPayload { operation: "create" })
                })
                .await?;

            Ok(Employee::from(record))
        })
    }

    fn delete<'a>(
        &'a self,
        id: &'a str,
        name: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<bool, DomainError>> + Send + 'a>> {
        Box::pin(async move {
            let body = serde_json::to_string(&DeleteEmployeeRequest { id, name })
                .map_err(|error| DomainError::unknown(format!("failed to encode deletion: {error}")))?;
            let target = UpstreamTarget::Id(id.to_owned());
            let deleted = self
                .retry
                .execute("delete", &target, || async {
                    let response = self
                        .exchange(HttpRequest::delete(&self.base_url).with_json_body(body.clone()))
                        .await?;
                    if response.body.trim().is_empty() {
                        return Ok(None);
                    }
                    payload::<bool>(response)
                })
                .await?;

            // An empty body or an envelope without data is a void success.
            Ok(deleted.unwrap_or(true))
        })
    }
}
