//! # Roster Core
//!
//! Resilient client for an upstream employee directory, plus the read-only views
//! derived from it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`classify`] | Upstream failure → [`DomainError`] mapping |
//! | [`config`] | Upstream address, timeout, retry and throttle settings |
//! | [`directory`] | Public directory operations and aggregations |
//! | [`domain`] | Employee models and creation validation |
//! | [`envelope`] | `{data, status, error}` codec |
//! | [`error`] | Domain, upstream and config errors |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`retry`] | Retry policy and executor |
//! | [`throttling`] | Optional outbound rate limit |
//! | [`upstream`] | The four upstream transport operations |
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ DirectoryService │  search / highest salary / top earners fold over list_all
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ EmployeeUpstream │────▶│  RetryExecutor   │──▶ classify()
//! └────────┬─────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   HttpClient     │────▶│ envelope::decode │
//! │ (reqwest/script) │     └──────────────────┘
//! └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use roster_core::{DomainError, DomainErrorKind};
//!
//! fn describe(error: &DomainError) -> &'static str {
//!     match error.kind() {
//!         DomainErrorKind::NotFound => "no such employee",
//!         DomainErrorKind::InvalidInput => "fix the request",
//!         DomainErrorKind::RateLimited => "try again later",
//!         DomainErrorKind::UpstreamUnavailable => "directory is down",
//!         DomainErrorKind::Unknown => "unexpected failure",
//!     }
//! }
//! ```

pub mod classify;
pub mod config;
pub mod directory;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod http_client;
pub mod retry;
pub mod throttling;
pub mod upstream;

pub use classify::{classify, UpstreamTarget};
pub use config::UpstreamConfig;
pub use directory::{DirectoryService, DEFAULT_TOP_EARNERS};
pub use domain::{Employee, EmployeeCreateRequest, EmployeeRecord, NewEmployee};
pub use envelope::{Decoded, Envelope, EnvelopeDecodeError, EnvelopeStatus};
pub use error::{ConfigError, DomainError, DomainErrorKind, UpstreamFailure};
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
    ScriptedHttpClient,
};
pub use retry::{Backoff, RetryExecutor, RetryPolicy, RetryState};
pub use throttling::OutboundThrottle;
pub use upstream::{EmployeeUpstream, HttpEmployeeUpstream};
