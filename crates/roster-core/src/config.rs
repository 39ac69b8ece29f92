//! Upstream client configuration.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `ROSTER_UPSTREAM_BASE_URL` | `http://localhost:8112/api/v1/employee` | Upstream collection root |
//! | `ROSTER_UPSTREAM_TIMEOUT_MS` | `3000` | Per-attempt transport timeout |
//! | `ROSTER_RETRY_MAX_ATTEMPTS` | `3` | Attempts per logical call |
//! | `ROSTER_RETRY_BASE_DELAY_MS` | `200` | First retry delay |
//! | `ROSTER_RETRY_MAX_DELAY_MS` | `3000` | Retry delay cap |
//! | `ROSTER_RETRY_JITTER` | `true` | Randomize retry delays |
//! | `ROSTER_UPSTREAM_RATE_LIMIT_PER_MINUTE` | unset | Outbound throttle |

use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;
use crate::retry::{Backoff, RetryPolicy};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8112/api/v1/employee";
pub const DEFAULT_TIMEOUT_MS: u64 = 3_000;

const BASE_URL: &str = "ROSTER_UPSTREAM_BASE_URL";
const TIMEOUT_MS: &str = "ROSTER_UPSTREAM_TIMEOUT_MS";
const MAX_ATTEMPTS: &str = "ROSTER_RETRY_MAX_ATTEMPTS";
const BASE_DELAY_MS: &str = "ROSTER_RETRY_BASE_DELAY_MS";
const MAX_DELAY_MS: &str = "ROSTER_RETRY_MAX_DELAY_MS";
const JITTER: &str = "ROSTER_RETRY_JITTER";
const RATE_LIMIT: &str = "ROSTER_UPSTREAM_RATE_LIMIT_PER_MINUTE";

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamConfig {
    base_url: String,
    pub timeout_ms: u64,
    pub retry: RetryPolicy,
    pub rate_limit_per_minute: Option<NonZeroU32>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry: RetryPolicy::default(),
            rate_limit_per_minute: None,
        }
    }
}

impl UpstreamConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Self::default().with_base_url(base_url)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL) {
            config = config.with_base_url(url)?;
        }
        if let Some(timeout) = parse::<u64>(&lookup, TIMEOUT_MS)? {
            config.timeout_ms = timeout;
        }
        if let Some(attempts) = parse::<u32>(&lookup, MAX_ATTEMPTS)? {
            config.retry.max_attempts = attempts;
        }

        let base = parse::<u64>(&lookup, BASE_DELAY_MS)?.unwrap_or(200);
        let max = parse::<u64>(&lookup, MAX_DELAY_MS)?.unwrap_or(3_000);
        let jitter = parse::<bool>(&lookup, JITTER)?.unwrap_or(true);
        config.retry.backoff = Backoff::Exponential {
            base: Duration::from_millis(base),
            factor: 2.0,
            max: Duration::from_millis(max.max(base)),
            jitter,
        };

        config.rate_limit_per_minute = parse::<u32>(&lookup, RATE_LIMIT)?.and_then(NonZeroU32::new);

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let value = base_url.into();
        let parsed = Url::parse(value.trim())
            .map_err(|_| ConfigError::InvalidBaseUrl { value: value.clone() })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl { value });
        }

        self.base_url = value.trim().trim_end_matches('/').to_owned();
        Ok(self)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Collection root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<T>()
        .map(Some)
        .map_err(|error| ConfigError::InvalidValue {
            key,
            value: raw.clone(),
            reason: error.to_string(),
        })
}
