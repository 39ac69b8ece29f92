//! Command-line options for the `roster` binary.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--bind` | `0.0.0.0:8111` | Listen address |
//! | `--upstream-url` | `ROSTER_UPSTREAM_BASE_URL` | Upstream collection root |
//! | `--timeout-ms` | `ROSTER_UPSTREAM_TIMEOUT_MS` | Per-attempt timeout |
//! | `--max-attempts` | `ROSTER_RETRY_MAX_ATTEMPTS` | Attempts per upstream call |
//! | `--log-filter` | `RUST_LOG` | tracing filter directives |

use std::net::SocketAddr;

use clap::Parser;
use roster_core::{ConfigError, UpstreamConfig};

pub const DEFAULT_LOG_FILTER: &str = "roster_web=info,roster_core=info,tower_http=info";

/// Employee directory backend-for-frontend.
///
/// Upstream settings are read from `ROSTER_*` environment variables first;
/// flags given here take precedence.
#[derive(Debug, Parser)]
#[command(name = "roster", author, version, about = "Employee directory backend-for-frontend")]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8111")]
    pub bind: SocketAddr,

    /// Upstream employee collection URL.
    #[arg(long)]
    pub upstream_url: Option<String>,

    /// Per-attempt upstream timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Total attempts per upstream call, including the first.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// tracing filter directives, e.g. `roster_core=debug`.
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Layers the flags given on the command line over `config`.
    pub fn apply(&self, mut config: UpstreamConfig) -> Result<UpstreamConfig, ConfigError> {
        if let Some(url) = &self.upstream_url {
            config = config.with_base_url(url.as_str())?;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        if let Some(max_attempts) = self.max_attempts {
            config.retry.max_attempts = max_attempts;
        }
        Ok(config)
    }

    /// `--log-filter`, then `RUST_LOG`, then [`DEFAULT_LOG_FILTER`].
    pub fn log_filter(&self) -> String {
        self.log_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| String::from(DEFAULT_LOG_FILTER))
    }
}
