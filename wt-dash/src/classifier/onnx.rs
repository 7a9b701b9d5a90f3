//! ONNX image classifier backed by tract

use image::DynamicImage;
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::{debug, info};

use super::preprocess::{image_to_tensor, InputLayout};
use super::{parse_labels, ClassifierError, Prediction, WasteClassifier};

/// Model input geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInput {
    /// Square input edge in pixels
    pub size: u32,
    pub layout: InputLayout,
}

impl Default for ModelInput {
    fn default() -> Self {
        Self {
            size: 224,
            layout: InputLayout::Nhwc,
        }
    }
}

pub struct OnnxClassifier {
    model: TypedRunnableModel<TypedModel>,
    labels: Vec<String>,
    input: ModelInput,
}

impl OnnxClassifier {
    /// Load an ONNX model and its labels file
    pub fn load(
        model_path: &Path,
        labels_path: &Path,
        input: ModelInput,
    ) -> Result<Self, ClassifierError> {
        let labels = parse_labels(&std::fs::read_to_string(labels_path)?);
        if labels.is_empty() {
            return Err(ClassifierError::NoLabels);
        }

        let shape = input.layout.shape(input.size as usize);
        let model = tract_onnx::onnx()
            .model_for_path(model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact(shape).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| ClassifierError::ModelLoad(format!("{}: {}", model_path.display(), e)))?;

        info!(
            model = %model_path.display(),
            labels = labels.len(),
            "Loaded waste classifier"
        );

        Ok(Self {
            model,
            labels,
            input,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl WasteClassifier for OnnxClassifier {
    fn predict(&self, image: &DynamicImage) -> Result<Prediction, ClassifierError> {
        let tensor = image_to_tensor(image, self.input.size, self.input.layout);

        let outputs = self
            .model
            .run(tvec!(tensor.into_tvalue()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifierError::Inference("model produced no outputs".to_string()))?;
        let scores: Vec<f32> = output
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?
            .iter()
            .copied()
            .collect();

        let prediction = Prediction::from_scores(&scores, &self.labels)?;
        debug!(
            label = %prediction.label,
            confidence = prediction.confidence,
            "Classified image"
        );
        Ok(prediction)
    }
}
