//! Maps a raw [`UpstreamFailure`] to exactly one [`DomainError`].
//!
//! | Condition | Result |
//! |-----------|--------|
//! | status 404 | `NotFound`, message names the target |
//! | status 400 | `InvalidInput`, message carries the body detail |
//! | status 429 | `RateLimited`, fixed message, body not echoed |
//! | status 5xx | `UpstreamUnavailable`, failure kept as cause |
//! | any other status | `Unknown`, failure passed through |
//!
//! Transport failures follow their retryability: retryable ones are
//! `UpstreamUnavailable`, the rest `Unknown`. Bodies that break the envelope contract
//! on a 2xx response are `UpstreamUnavailable`.

use std::fmt::{Display, Formatter};

use crate::envelope;
use crate::error::{DomainError, UpstreamFailure};

pub const RATE_LIMIT_MESSAGE: &str = "rate limit exceeded";
pub const UNAVAILABLE_MESSAGE: &str = "upstream employee service unavailable";

/// What an upstream call was aimed at; used to phrase `NotFound` messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamTarget {
    Collection,
    Id(String),
    Name(String),
}

impl Display for UpstreamTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection => f.write_str("employee collection"),
            Self::Id(id) => write!(f, "employee with id '{id}'"),
            Self::Name(name) => write!(f, "employee named '{name}'"),
        }
    }
}

/// Classifies one failed attempt. Pure and deterministic.
pub fn classify(failure: &UpstreamFailure, target: &UpstreamTarget) -> DomainError {
    match failure {
        UpstreamFailure::Status { status, body } => classify_status(*status, body, target, failure),
        UpstreamFailure::Transport(error) if error.retryable() => {
            DomainError::upstream_unavailable(UNAVAILABLE_MESSAGE, failure.clone())
        }
        UpstreamFailure::Transport(_) => DomainError::Unknown {
            message: failure.to_string(),
            cause: Some(failure.clone()),
        },
        UpstreamFailure::Malformed { .. } | UpstreamFailure::MissingPayload { .. } => {
            DomainError::upstream_unavailable(UNAVAILABLE_MESSAGE, failure.clone())
        }
    }
}

fn classify_status(
    status: u16,
    body: &str,
    target: &UpstreamTarget,
    failure: &UpstreamFailure,
) -> DomainError {
    match status {
        404 => DomainError::not_found(format!("{target} not found")),
        400 => DomainError::invalid_input(format!("invalid input: {}", envelope::error_detail(body))),
        429 => DomainError::rate_limited(RATE_LIMIT_MESSAGE),
        500..=599 => DomainError::upstream_unavailable(UNAVAILABLE_MESSAGE, failure.clone()),
        _ => DomainError::Unknown {
            message: failure.to_string(),
            cause: Some(failure.clone()),
        },
    }
}
