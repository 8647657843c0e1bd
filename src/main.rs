mod api;
mod cli;
mod config;
mod error;
mod gateway;
mod models;
mod sheets;

use clap::Parser;

use crate::cli::Cli;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

// Request spans from the HTTP layer are logged alongside our own events.
const DEFAULT_LOG_FILTER: &str = "sheet_gateway=info,tower_http=info";

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = cli.run().await {
        error!(code = ?e.code(), "Error: {}", e);
        std::process::exit(1);
    }
}
