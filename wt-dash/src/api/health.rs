//! Health check endpoint
//!
//! Reports the dashboard's own state only; the bin service is not probed,
//! so a cold bin service never makes the dashboard look unhealthy.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Scans recorded in the current session
    pub scans: usize,
    pub bins_url: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let scans = state.session.lock().await.summary().scans;

    Json(HealthResponse {
        status: "ok",
        module: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        scans,
        bins_url: state.bins.bins_url().to_string(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
