//! Waste image classification
//!
//! Any image classifier can sit behind [`WasteClassifier`]. The bundled
//! implementation runs an ONNX export of a two-class image model through
//! tract (see [`onnx::OnnxClassifier`]).
//!
//! Raw model labels are mapped onto [`WasteLabel`]: a label containing "Wet"
//! is `Wet`, otherwise one containing "Dry" is `Dry`, and anything else is
//! kept as [`WasteLabel::Unrecognized`] so callers can never mistake it for
//! a real category.

pub mod onnx;
pub mod preprocess;

use image::DynamicImage;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub use onnx::OnnxClassifier;
pub use preprocess::InputLayout;

/// Classifier errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("Failed to read labels file: {0}")]
    Labels(#[from] std::io::Error),

    #[error("Labels file contains no labels")]
    NoLabels,

    #[error("Model produced {scores} scores for {labels} labels")]
    OutputMismatch { scores: usize, labels: usize },

    #[error("Inference failed: {0}")]
    Inference(String),
}

/// Waste category as understood by the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WasteLabel {
    Wet,
    Dry,
    /// Model label that names neither category, kept verbatim
    Unrecognized(String),
}

impl WasteLabel {
    /// Map a raw model label onto a waste category
    pub fn from_raw(raw: &str) -> Self {
        if raw.contains("Wet") {
            WasteLabel::Wet
        } else if raw.contains("Dry") {
            WasteLabel::Dry
        } else {
            WasteLabel::Unrecognized(raw.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WasteLabel::Wet => "Wet",
            WasteLabel::Dry => "Dry",
            WasteLabel::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, WasteLabel::Unrecognized(_))
    }
}

impl fmt::Display for WasteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WasteLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One classification result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: WasteLabel,
    /// Score of the winning class, clamped to `[0, 1]`
    pub confidence: f32,
}

impl Prediction {
    /// Pick the highest-scoring label
    ///
    /// `scores[i]` belongs to `labels[i]`. NaN scores never win.
    pub fn from_scores(scores: &[f32], labels: &[String]) -> Result<Self, ClassifierError> {
        if labels.is_empty() {
            return Err(ClassifierError::NoLabels);
        }
        if scores.len() != labels.len() {
            return Err(ClassifierError::OutputMismatch {
                scores: scores.len(),
                labels: labels.len(),
            });
        }

        let (best, score) = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, s)| !s.is_nan())
            .fold(None, |best: Option<(usize, f32)>, (i, s)| match best {
                Some((_, top)) if top >= s => best,
                _ => Some((i, s)),
            })
            .ok_or_else(|| ClassifierError::Inference("all scores are NaN".to_string()))?;

        Ok(Self {
            label: WasteLabel::from_raw(&labels[best]),
            confidence: score.clamp(0.0, 1.0),
        })
    }
}

/// Anything that can turn a photo into a [`Prediction`]
pub trait WasteClassifier: Send + Sync {
    fn predict(&self, image: &DynamicImage) -> Result<Prediction, ClassifierError>;
}

/// Parse a labels file: one label per line, blank lines ignored
///
/// Lines may carry a leading class index (`"0 Wet Waste"`); the whole line
/// is kept since label mapping only looks for "Wet"/"Dry" substrings.
pub fn parse_labels(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
