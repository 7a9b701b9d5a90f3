//! Session statistics and reset

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::session::Summary;
use crate::AppState;

/// GET /api/summary
pub async fn summary(State(state): State<AppState>) -> Json<Summary> {
    Json(state.session.lock().await.summary())
}

/// POST /api/session/reset
///
/// Clears tallies, points and the duplicate guard. The CSV log is kept.
pub async fn reset_session(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.reset();
    info!("Session reset");
    StatusCode::NO_CONTENT
}
