mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use roster_core::{DirectoryService, HttpEmployeeUpstream, ReqwestHttpClient, UpstreamConfig};
use roster_web::{build_router, serve, AppState, ServeError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "roster exited with an error");
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), ServeError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_filter())?;

    let config = cli.apply(UpstreamConfig::from_env()?)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        upstream = config.base_url(),
        timeout_ms = config.timeout_ms,
        max_attempts = config.retry.max_attempts,
        rate_limit_per_minute = config.rate_limit_per_minute.map(|limit| limit.get()),
        "configuration loaded"
    );

    let upstream = HttpEmployeeUpstream::new(Arc::new(ReqwestHttpClient::new()), &config);
    let directory = DirectoryService::new(Arc::new(upstream));

    serve(cli.bind, build_router(AppState::new(directory))).await
}

fn init_tracing(filter: &str) -> Result<(), ServeError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|error| ServeError::LogFilter {
        filter: filter.to_owned(),
        reason: error.to_string(),
    })?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
    Ok(())
}
