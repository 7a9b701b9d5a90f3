//! Write path: bins report their status here

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};
use wt_common::BinObservation;

use crate::api::ApiError;
use crate::AppState;

/// Fixed acknowledgement; the stored record is not echoed back
#[derive(Debug, Serialize)]
pub struct AlertResponse {
    pub message: &'static str,
}

/// POST /garbage_alert
///
/// Validates the body against [`BinObservation`] before touching the store.
/// Wrong-typed or missing fields are rejected with the extractor's 4xx.
pub async fn garbage_alert(
    State(state): State<AppState>,
    body: Result<Json<BinObservation>, JsonRejection>,
) -> Result<Json<AlertResponse>, ApiError> {
    let Json(observation) = body.map_err(|rejection| {
        warn!("Rejected bin alert: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    state.bins.upsert(&observation).await?;

    info!(
        bin_id = %observation.bin_id,
        status = %observation.status,
        "Alert received"
    );

    Ok(Json(AlertResponse {
        message: "Alert received",
    }))
}
