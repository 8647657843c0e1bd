use crate::api;
use crate::config::Config;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::sheets::GoogleClientFactory;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Config file to load instead of the default location
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides the config file
    #[arg(long, env = "SHEET_GATEWAY_HOST")]
    pub host: Option<String>,

    /// Port to listen on, overrides the config file
    #[arg(long, short, env = "SHEET_GATEWAY_PORT")]
    pub port: Option<u16>,
}

pub async fn execute(args: &ServeArgs) -> Result<()> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let gateway = Gateway::new(Arc::new(GoogleClientFactory));
    let app = api::router(gateway, &config.server)?;

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!(
        address = %listener.local_addr()?,
        origins = ?config.server.allowed_origins,
        "Sheet gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
