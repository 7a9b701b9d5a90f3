//! wt-dash - Waste tracking dashboard
//!
//! Classifies uploaded waste photos, keeps per-session statistics and shows
//! the smart bins reported by wt-bins on a map.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use wt_common::config::load_toml_config;
use wt_dash::bin_client::BinClient;
use wt_dash::classifier::OnnxClassifier;
use wt_dash::config::{DashConfig, DashOverrides, DashToml};
use wt_dash::session::DashboardSession;
use wt_dash::waste_log::WasteLog;
use wt_dash::{build_router, AppState};

/// Command-line arguments for wt-dash
#[derive(Parser, Debug)]
#[command(name = "wt-dash")]
#[command(about = "Waste classification dashboard for the waste tracker")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// URL of the bin service's bin list
    #[arg(long)]
    bins_url: Option<String>,

    /// ONNX model file
    #[arg(long)]
    model: Option<PathBuf>,

    /// Labels file, one label per line in model output order
    #[arg(long)]
    labels: Option<PathBuf>,

    /// CSV file scans are appended to
    #[arg(long)]
    log_path: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(short, long, env = "WT_DASH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let file: DashToml = load_toml_config(args.config.as_deref())
        .context("Failed to load config file")?;
    let config = DashConfig::resolve(
        DashOverrides {
            port: args.port,
            bins_url: args.bins_url,
            model_path: args.model,
            labels_path: args.labels,
            log_path: args.log_path,
        },
        file,
    )
    .context("Invalid configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter_directive("wt-dash").into()),
        )
        .init();

    info!("Starting wt-dash v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = args.config.as_ref().filter(|p| !p.exists()) {
        warn!("Config file not found: {} (using defaults)", path.display());
    }

    let classifier = OnnxClassifier::load(
        &config.model_path,
        &config.labels_path,
        config.model_input,
    )
    .context("Failed to load waste classifier")?;

    let bins = BinClient::new(config.bins_url.clone(), config.retry)
        .context("Failed to create bin service client")?;
    info!("Bin service: {}", bins.bins_url());
    info!("Waste log: {}", config.log_path.display());
    match config.points_per_scan {
        Some(points) => info!("Points enabled: {} per scan", points),
        None => info!("Points disabled"),
    }

    let state = AppState::new(
        DashboardSession::new(config.points_per_scan),
        Arc::new(classifier),
        WasteLog::new(&config.log_path),
        bins,
    );
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("wt-dash listening on http://{}", addr);

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
