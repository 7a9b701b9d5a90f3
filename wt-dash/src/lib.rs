//! wt-dash library - Waste tracking dashboard
//!
//! Serves a small browser UI where photos of waste are classified as wet or
//! dry, tallied per session and logged to CSV, next to a map of the smart
//! bins reported by wt-bins.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod bin_client;
pub mod classifier;
pub mod config;
pub mod map;
pub mod scan;
pub mod session;
pub mod waste_log;

use bin_client::BinClient;
use classifier::WasteClassifier;
use session::DashboardSession;
use waste_log::WasteLog;

/// Largest accepted photo upload
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Mutex<DashboardSession>>,
    pub classifier: Arc<dyn WasteClassifier>,
    pub waste_log: Arc<WasteLog>,
    pub bins: Arc<BinClient>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        session: DashboardSession,
        classifier: Arc<dyn WasteClassifier>,
        waste_log: WasteLog,
        bins: BinClient,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            classifier,
            waste_log: Arc::new(waste_log),
            bins: Arc::new(bins),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::index))
        .route("/static/app.js", get(api::app_js))
        .route("/api/scan", post(api::scan))
        .route("/api/summary", get(api::summary))
        .route("/api/session/reset", post(api::reset_session))
        .route("/api/map", get(api::map))
        .merge(api::health_routes())
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
