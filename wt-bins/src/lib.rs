//! wt-bins library - Smart bin status service
//!
//! Records bin observations and lists the last known state of every bin.

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use wt_common::db::BinStore;

pub mod api;
pub mod config;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub bins: BinStore,
}

impl AppState {
    /// Create new application state
    pub fn new(bins: BinStore) -> Self {
        Self { bins }
    }
}

/// Build application router
///
/// CORS is fully permissive so a dashboard served from any origin can read
/// `/bins`. Acceptable for the demo deployment only.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/garbage_alert", post(api::garbage_alert))
        .route("/bins", get(api::list_bins))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
