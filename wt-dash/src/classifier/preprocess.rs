//! Image to tensor conversion
//!
//! Photos are stretched to the model's square input, converted to RGB and
//! scaled to `[0, 1]`.

use image::{imageops, DynamicImage};
use serde::Deserialize;
use std::str::FromStr;
use tract_onnx::prelude::*;

/// Memory layout the model expects for its single image input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputLayout {
    /// `[1, height, width, 3]` (Keras / TensorFlow exports)
    #[default]
    Nhwc,
    /// `[1, 3, height, width]` (PyTorch exports)
    Nchw,
}

impl InputLayout {
    pub fn shape(&self, size: usize) -> [usize; 4] {
        match self {
            InputLayout::Nhwc => [1, size, size, 3],
            InputLayout::Nchw => [1, 3, size, size],
        }
    }
}

impl FromStr for InputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nhwc" => Ok(InputLayout::Nhwc),
            "nchw" => Ok(InputLayout::Nchw),
            other => Err(format!("unknown input layout '{}' (expected nhwc or nchw)", other)),
        }
    }
}

/// Resize `image` to `size`×`size` and lay it out as a model input tensor
pub fn image_to_tensor(image: &DynamicImage, size: u32, layout: InputLayout) -> Tensor {
    let rgb = image
        .resize_exact(size, size, imageops::FilterType::Triangle)
        .to_rgb8();
    let n = size as usize;

    let channel = |x: usize, y: usize, c: usize| rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0;

    match layout {
        InputLayout::Nhwc => {
            tract_ndarray::Array4::from_shape_fn((1, n, n, 3), |(_, y, x, c)| channel(x, y, c))
                .into_tensor()
        }
        InputLayout::Nchw => {
            tract_ndarray::Array4::from_shape_fn((1, 3, n, n), |(_, c, y, x)| channel(x, y, c))
                .into_tensor()
        }
    }
}
