//! Model abstraction
//!
//! The classifier is an opaque pre-trained artifact: it is loaded once at
//! startup and never mutated afterwards. The [`DigitModel`] trait is the
//! seam between the service and the artifact format.

mod onnx;

pub use onnx::OnnxDigitModel;

use ndarray::{Array1, Array2};
use serde::Serialize;

use crate::error::Result;

/// Number of digit classes
pub const CLASS_COUNT: usize = 10;

/// A pre-trained digit classifier.
///
/// Maps a normalized 28×28 single-channel image to one raw score per digit
/// class. Implementations are immutable after construction and shared
/// read-only across request handlers.
pub trait DigitModel: Send + Sync {
    /// Raw class scores for a single image, one per digit 0 through 9.
    fn class_scores(&self, image: &Array2<f32>) -> Result<Array1<f32>>;
}

/// Metadata describing a loaded model artifact
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub path: String,
    pub format: String,
    pub input_shape: String,
    pub output_shape: String,
    pub loaded_at: String,
}
