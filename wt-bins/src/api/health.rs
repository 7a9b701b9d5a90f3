//! Liveness plus a store round trip

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok", or "degraded" when the store cannot be queried
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    /// Known bins; absent when degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bins: Option<i64>,
}

/// GET /health
///
/// 503 when the database does not answer, so a load balancer can tell a
/// running process from a usable one.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, bins) = match state.bins.count().await {
        Ok(count) => (StatusCode::OK, "ok", Some(count)),
        Err(e) => {
            warn!("Health check could not reach the bin store: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", None)
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            module: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            bins,
        }),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
