//! Bounded retry of a single upstream call.
//!
//! Every failed attempt is classified; only transient kinds (`RateLimited`,
//! `UpstreamUnavailable`) are retried. When attempts run out the last classified
//! error is returned unchanged.
//!
//! ```text
//! Attempting ──ok──────────────────────────▶ Success
//!     │
//!     ├─transient, attempts left──▶ Retrying ──delay──▶ Attempting
//!     │
//!     └─non-transient or exhausted────────▶ Failed
//! ```

use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::classify::{classify, UpstreamTarget};
use crate::error::{DomainError, UpstreamFailure};

/// Delay schedule between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    Fixed {
        delay: Duration,
    },
    /// `base * factor^retry`, capped at `max`, optionally jittered by +/- 50%.
    Exponential {
        base: Duration,
        factor: f64,
        max: Duration,
        jitter: bool,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(200),
            factor: 2.0,
            max: Duration::from_secs(3),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Delay before retry number `retry` (0-based).
    pub fn delay(self, retry: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
                let seconds = base.as_secs_f64() * factor.powi(exponent);
                let capped_seconds = seconds.min(max.as_secs_f64());
                let delay = Duration::from_secs_f64(capped_seconds.max(0.0));

                if !jitter {
                    return delay;
                }

                let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                let spread = millis / 2;
                let offset = fastrand::u64(0..=spread.saturating_mul(2));
                Duration::from_millis((millis - spread).saturating_add(offset))
            }
        }
    }
}

/// How many times, and how far apart, one logical upstream call may be attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first. Zero behaves like one.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::default(),
        }
    }
}

impl RetryPolicy {
    pub fn exponential(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    pub fn fixed(delay: Duration, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed { delay },
        }
    }

    pub fn no_retry() -> Self {
        Self::fixed(Duration::ZERO, 1)
    }

    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.backoff.delay(retry)
    }
}

/// Per-invocation bookkeeping. Lives only for one logical call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    pub attempt: u32,
    pub max_attempts: u32,
    pub last_error: Option<DomainError>,
}

impl RetryState {
    fn new(max_attempts: u32) -> Self {
        Self {
            attempt: 0,
            max_attempts,
            last_error: None,
        }
    }

    pub const fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempt)
    }

    /// Whether the last recorded failure leads back to another attempt.
    pub fn will_retry(&self) -> bool {
        self.attempts_remaining() > 0
            && self.last_error.as_ref().is_some_and(DomainError::is_transient)
    }
}

type Observer = Arc<dyn Fn(&str, &RetryState) + Send + Sync>;

/// Runs upstream calls under a [`RetryPolicy`].
///
/// Holds no state between invocations; it is safe to share across concurrent calls.
#[derive(Clone, Default)]
pub struct RetryExecutor {
    policy: RetryPolicy,
    observer: Option<Observer>,
}

impl Debug for RetryExecutor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("policy", &self.policy)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl RetryExecutor {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            observer: None,
        }
    }

    /// Registers a callback that sees the state after every failed attempt.
    pub fn with_observer(
        mut self,
        observer: impl Fn(&str, &RetryState) + Send + Sync + 'static,
    ) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Runs `call` until it succeeds, fails non-transiently, or exhausts the policy.
    pub async fn execute<T, F, Fut>(
        &self,
        operation: &str,
        target: &UpstreamTarget,
        mut call: F,
    ) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, UpstreamFailure>>,
    {
        let mut state = RetryState::new(self.policy.effective_attempts());

        loop {
            state.attempt += 1;
            let failure = match call().await {
                Ok(value) => {
                    if state.attempt > 1 {
                        tracing::debug!(operation, attempt = state.attempt, "upstream call recovered");
                    }
                    return Ok(value);
                }
                Err(failure) => failure,
            };

            let error = classify(&failure, target);
            state.last_error = Some(error.clone());
            if let Some(observer) = &self.observer {
                observer(operation, &state);
            }

            if !state.will_retry() {
                if error.is_transient() {
                    tracing::warn!(
                        operation,
                        attempts = state.attempt,
                        code = error.code(),
                        "upstream call failed after exhausting retries"
                    );
                }
                return Err(error);
            }

            let delay = self.policy.delay_for_retry(state.attempt - 1);
            tracing::warn!(
                operation,
                attempt = state.attempt,
                max_attempts = state.max_attempts,
                code = error.code(),
                cause = %failure,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "retrying upstream call"
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}
