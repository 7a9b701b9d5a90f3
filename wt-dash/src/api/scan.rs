//! Photo upload endpoint

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::classifier::WasteLabel;
use crate::scan::{process_upload, DashError, Upload};
use crate::session::{ScanOutcome, Summary};
use crate::AppState;

const DUPLICATE_MESSAGE: &str =
    "This file has already been processed. Upload a new file to add more data.";

#[derive(Debug, Deserialize)]
pub struct ScanParams {
    pub filename: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScanResponse {
    Recorded {
        message: String,
        filename: String,
        label: WasteLabel,
        confidence: f32,
        mass_kg: f64,
        summary: Summary,
    },
    Duplicate {
        message: String,
        filename: String,
        summary: Summary,
    },
}

/// POST /api/scan?filename=<name>
///
/// Body is the raw image file (JPEG or PNG).
pub async fn scan(
    State(state): State<AppState>,
    Query(params): Query<ScanParams>,
    body: Bytes,
) -> Result<Json<ScanResponse>, DashError> {
    let filename = params.filename.ok_or(DashError::MissingFilename)?;

    let outcome = process_upload(
        &state,
        Upload {
            filename,
            bytes: body.to_vec(),
        },
    )
    .await?;
    let summary = state.session.lock().await.summary();

    let response = match outcome {
        ScanOutcome::Recorded(record) => ScanResponse::Recorded {
            message: format!(
                "Prediction: {} ({:.2}% confidence)",
                record.prediction.label,
                record.prediction.confidence * 100.0
            ),
            filename: record.filename,
            label: record.prediction.label,
            confidence: record.prediction.confidence,
            mass_kg: record.mass_kg,
            summary,
        },
        ScanOutcome::Duplicate { filename } => ScanResponse::Duplicate {
            message: DUPLICATE_MESSAGE.to_string(),
            filename,
            summary,
        },
    };

    Ok(Json(response))
}
