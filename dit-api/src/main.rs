//! dit-api - donation tracker HTTP API
//!
//! Serves the JSON collections written by `dit-etl transform`, falling back to
//! embedded mock data for any collection that has not been exported.

use anyhow::{Context, Result};
use clap::Parser;
use dit_api::store::DataStore;
use dit_api::{build_router, AppState};
use dit_common::config::{load_toml_config, ConfigOverrides, Settings};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for dit-api
#[derive(Parser, Debug)]
#[command(name = "dit-api")]
#[command(about = "Donation tracker HTTP API")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "DIT_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory holding the exported JSON collections
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml_config, config_source) =
        load_toml_config(args.config.as_deref()).context("Failed to load config")?;
    let overrides = ConfigOverrides {
        output_dir: args.output_dir.clone(),
        api_port: args.port,
        ..Default::default()
    };
    let settings = Settings::resolve(&overrides, &toml_config).context("Invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    config_source.log();
    info!("Starting dit-api v{}", env!("CARGO_PKG_VERSION"));
    info!(dir = %settings.output_dir.display(), "Loading exported data");

    let store = DataStore::load(&settings.output_dir);
    let app = build_router(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.api_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
