//! Scan orchestration
//!
//! One upload goes: duplicate check, image decode, classification on a
//! blocking thread, session bookkeeping, CSV append. Decoding, inference and
//! file I/O all run on the blocking pool; the async session lock is not held
//! while the classifier runs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::bin_client::BinFetchError;
use crate::classifier::ClassifierError;
use crate::session::ScanOutcome;
use crate::waste_log::WasteLogError;
use crate::AppState;

/// Dashboard errors
#[derive(Debug, Error)]
pub enum DashError {
    #[error("Missing filename")]
    MissingFilename,

    #[error("Could not decode image: {0}")]
    InvalidImage(String),

    #[error("Classification failed: {0}")]
    Classifier(#[from] ClassifierError),

    #[error("Could not write waste log: {0}")]
    Log(#[from] WasteLogError),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Could not fetch bin data: {0}")]
    BinFetch(#[from] BinFetchError),
}

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashError::MissingFilename | DashError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            DashError::Classifier(_) | DashError::Log(_) | DashError::Task(_) => {
                error!("Scan failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            DashError::BinFetch(_) => StatusCode::BAD_GATEWAY,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// One uploaded photo
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Classify and record one upload
///
/// A duplicate filename short-circuits before the image is decoded. The
/// name is compared exactly as uploaded. If the CSV append fails the session
/// is left as it was.
pub async fn process_upload(state: &AppState, upload: Upload) -> Result<ScanOutcome, DashError> {
    let Upload { filename, bytes } = upload;
    if filename.is_empty() {
        return Err(DashError::MissingFilename);
    }

    if state.session.lock().await.is_duplicate(&filename) {
        info!(filename = %filename, "Skipping already processed file");
        return Ok(ScanOutcome::Duplicate { filename });
    }

    let classifier = state.classifier.clone();
    let prediction = tokio::task::spawn_blocking(move || {
        let image = image::load_from_memory(&bytes)
            .map_err(|e| DashError::InvalidImage(e.to_string()))?;
        classifier.predict(&image).map_err(DashError::from)
    })
    .await
    .map_err(|e| DashError::Task(e.to_string()))??;

    let at = chrono::Local::now().naive_local();

    // Held until commit: another request may record the same file while the
    // classifier runs, and the CSV row must land before the tallies change.
    let mut session = state.session.lock().await;
    let outcome = session.plan_scan(&filename, &prediction, at);
    if let ScanOutcome::Recorded(record) = &outcome {
        if !prediction.label.is_recognized() {
            warn!(
                filename = %filename,
                label = %prediction.label,
                "Model label is neither Wet nor Dry"
            );
        }

        let waste_log = state.waste_log.clone();
        let entry = record.entry.clone();
        tokio::task::spawn_blocking(move || waste_log.append(&entry))
            .await
            .map_err(|e| DashError::Task(e.to_string()))??;

        session.commit(record);
        info!(
            filename = %filename,
            label = %prediction.label,
            confidence = prediction.confidence,
            mass_kg = record.mass_kg,
            "Recorded scan"
        );
    }

    Ok(outcome)
}
