//! Read path: every bin's last known state

use axum::{extract::State, Json};
use wt_common::BinRecord;

use crate::api::ApiError;
use crate::AppState;

/// GET /bins
///
/// Full list, no pagination or filtering. Empty store returns `[]`.
pub async fn list_bins(State(state): State<AppState>) -> Result<Json<Vec<BinRecord>>, ApiError> {
    let records = state.bins.list_all().await?;
    Ok(Json(records))
}
