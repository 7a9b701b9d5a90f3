//! Bin map endpoint

use axum::{extract::State, Json};

use crate::map::MapView;
use crate::scan::DashError;
use crate::AppState;

/// GET /api/map
///
/// Fetches the bin list (with retries) on every call; nothing is cached.
pub async fn map(State(state): State<AppState>) -> Result<Json<MapView>, DashError> {
    let bins = state.bins.fetch_bins().await?;
    Ok(Json(MapView::from_bins(&bins)))
}
