//! wt-bins - Smart bin status service
//!
//! Bins (or anything speaking for them) POST their status to
//! `/garbage_alert`; the dashboard reads every bin back from `/bins`.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use wt_bins::config::{BinsConfig, BinsToml};
use wt_bins::{build_router, AppState};
use wt_common::config::load_toml_config;
use wt_common::db::{init_database, BinStore};

/// Command-line arguments for wt-bins
#[derive(Parser, Debug)]
#[command(name = "wt-bins")]
#[command(about = "Smart bin status service for the waste tracker")]
#[command(version)]
struct Args {
    /// Port to listen on (falls back to $PORT, then 10000)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long, env = "WT_BINS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let file: BinsToml = load_toml_config(args.config.as_deref())
        .context("Failed to load config file")?;
    let config = BinsConfig::resolve(args.port, args.database, file)
        .context("Invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter_directive("wt-bins").into()),
        )
        .init();

    info!("Starting wt-bins v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = args.config.as_ref().filter(|p| !p.exists()) {
        warn!("Config file not found: {} (using defaults)", path.display());
    }

    let pool = init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;
    info!("Database path: {}", config.database_path.display());

    let app = build_router(AppState::new(BinStore::new(pool)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("wt-bins listening on http://{}", addr);
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
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
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
