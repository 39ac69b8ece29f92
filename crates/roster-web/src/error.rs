use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use roster_core::{ConfigError, DomainError, DomainErrorKind, Envelope};
use thiserror::Error;

/// A [`DomainError`] on its way out of a handler.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] DomainError);

impl ApiError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self(DomainError::invalid_input(message))
    }

    pub const fn status(&self) -> StatusCode {
        match self.0.kind() {
            DomainErrorKind::NotFound => StatusCode::NOT_FOUND,
            DomainErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            DomainErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            DomainErrorKind::UpstreamUnavailable => StatusCode::BAD_GATEWAY,
            DomainErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = &self.0;

        match error.kind() {
            DomainErrorKind::UpstreamUnavailable | DomainErrorKind::Unknown => {
                let cause = error.cause().map(ToString::to_string).unwrap_or_default();
                tracing::error!(
                    code = error.code(),
                    %status,
                    message = error.message(),
                    cause = %cause,
                    "request failed"
                );
            }
            _ => {
                tracing::warn!(
                    code = error.code(),
                    %status,
                    message = error.message(),
                    "request rejected"
                );
            }
        }

        (status, Json(Envelope::<()>::failure(error.message()))).into_response()
    }
}

/// Failures that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid log filter '{filter}': {reason}")]
    LogFilter { filter: String, reason: String },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ServeError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::LogFilter { .. } => 2,
            Self::Bind { .. } => 3,
            Self::Io(_) => 10,
        }
    }
}
