use thiserror::Error;

use crate::http_client::HttpError;

/// Raw outcome of one failed upstream attempt, before classification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamFailure {
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("upstream transport error: {0}")]
    Transport(HttpError),

    #[error("upstream body did not match the envelope contract (status {status}): {detail}")]
    Malformed { status: u16, detail: String },

    #[error("upstream {operation} response carried no data")]
    MissingPayload { operation: &'static str },
}

/// Fieldless discriminant of [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    NotFound,
    InvalidInput,
    RateLimited,
    UpstreamUnavailable,
    Unknown,
}

/// Stable failure taxonomy surfaced by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{message}")]
    RateLimited { message: String },

    #[error("{message}")]
    UpstreamUnavailable {
        message: String,
        #[source]
        cause: UpstreamFailure,
    },

    #[error("{message}")]
    Unknown {
        message: String,
        cause: Option<UpstreamFailure>,
    },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn upstream_unavailable(message: impl Into<String>, cause: UpstreamFailure) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
            cause,
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            cause: None,
        }
    }

    pub const fn kind(&self) -> DomainErrorKind {
        match self {
            Self::NotFound { .. } => DomainErrorKind::NotFound,
            Self::InvalidInput { .. } => DomainErrorKind::InvalidInput,
            Self::RateLimited { .. } => DomainErrorKind::RateLimited,
            Self::UpstreamUnavailable { .. } => DomainErrorKind::UpstreamUnavailable,
            Self::Unknown { .. } => DomainErrorKind::Unknown,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::InvalidInput { message }
            | Self::RateLimited { message }
            | Self::UpstreamUnavailable { message, .. }
            | Self::Unknown { message, .. } => message,
        }
    }

    /// The upstream failure retained for diagnostics, if any.
    pub const fn cause(&self) -> Option<&UpstreamFailure> {
        match self {
            Self::UpstreamUnavailable { cause, .. } => Some(cause),
            Self::Unknown { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }

    /// Transient failures are the only ones the retry executor repeats.
    pub const fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            DomainErrorKind::RateLimited | DomainErrorKind::UpstreamUnavailable
        )
    }

    pub const fn code(&self) -> &'static str {
        match self.kind() {
            DomainErrorKind::NotFound => "directory.not_found",
            DomainErrorKind::InvalidInput => "directory.invalid_input",
            DomainErrorKind::RateLimited => "directory.rate_limited",
            DomainErrorKind::UpstreamUnavailable => "directory.upstream_unavailable",
            DomainErrorKind::Unknown => "directory.unknown",
        }
    }
}

/// Configuration errors raised while assembling an [`UpstreamConfig`](crate::UpstreamConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("upstream base url '{value}' is not an absolute http(s) url")]
    InvalidBaseUrl { value: String },
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn only_rate_limited_and_unavailable_are_transient() {
        let cause = UpstreamFailure::Status {
            status: 503,
            body: String::new(),
        };

        assert!(DomainError::rate_limited("slow down").is_transient());
        assert!(DomainError::upstream_unavailable("down", cause).is_transient());
        assert!(!DomainError::not_found("gone").is_transient());
        assert!(!DomainError::invalid_input("bad").is_transient());
        assert!(!DomainError::unknown("odd").is_transient());
    }

    #[test]
    fn unavailable_chains_its_cause() {
        let error = DomainError::upstream_unavailable(
            "upstream employee service unavailable",
            UpstreamFailure::Status {
                status: 502,
                body: String::from("bad gateway"),
            },
        );

        assert_eq!(error.to_string(), "upstream employee service unavailable");
        let source = error.source().expect("cause is chained");
        assert_eq!(source.to_string(), "upstream returned status 502: bad gateway");
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(DomainError::not_found("x").code(), "directory.not_found");
        assert_eq!(DomainError::unknown("x").code(), "directory.unknown");
        assert_eq!(DomainError::rate_limited("x").kind(), DomainErrorKind::RateLimited);
    }
}
