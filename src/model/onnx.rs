//! ONNX artifact loading and execution via tract
//!
//! The network architecture lives entirely in the artifact. This adapter
//! only pins the input to a 1×1×28×28 tensor, runs the optimized plan, and
//! hands back the raw class scores.

use ndarray::{Array1, Array2};
use tract_onnx::prelude::*;
use tracing::info;

use crate::error::{Result, ScrawlError};
use crate::grid::GRID_SIDE;

use super::{DigitModel, ModelInfo, CLASS_COUNT};

type RunnablePlan = RunnableModel<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Digit classifier backed by an ONNX artifact.
pub struct OnnxDigitModel {
    plan: RunnablePlan,
    info: ModelInfo,
}

impl std::fmt::Debug for OnnxDigitModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxDigitModel")
            .field("info", &self.info)
            .finish()
    }
}

impl OnnxDigitModel {
    /// Load and optimize the artifact at `path`.
    ///
    /// Any failure here (missing file, unreadable graph, incompatible
    /// input) is terminal for the caller, so everything maps to
    /// [`ScrawlError::ModelUnavailable`].
    pub fn load(path: &str) -> Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| {
                m.with_input_fact(0, f32::fact([1, 1, GRID_SIDE, GRID_SIDE]).into())
            })
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| ScrawlError::ModelUnavailable {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let info = ModelInfo {
            path: path.to_string(),
            format: "onnx".to_string(),
            input_shape: format!("1x1x{}x{}", GRID_SIDE, GRID_SIDE),
            output_shape: format!("1x{}", CLASS_COUNT),
            loaded_at: chrono::Utc::now().to_rfc3339(),
        };

        info!(path = %info.path, "Model artifact loaded and optimized");
        Ok(Self { plan, info })
    }

    /// Metadata for the loaded artifact.
    pub fn info(&self) -> &ModelInfo {
        &self.info
    }
}

impl DigitModel for OnnxDigitModel {
    fn class_scores(&self, image: &Array2<f32>) -> Result<Array1<f32>> {
        // Batch and channel dimensions are both 1 for a single drawing
        let input: Tensor = tract_ndarray::Array4::from_shape_fn(
            (1, 1, GRID_SIDE, GRID_SIDE),
            |(_, _, y, x)| image[[y, x]],
        )
        .into();

        let outputs = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ScrawlError::InferenceFailure(e.to_string()))?;

        let view = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| ScrawlError::InferenceFailure(e.to_string()))?;

        let scores: Vec<f32> = view.iter().copied().collect();
        if scores.len() != CLASS_COUNT {
            return Err(ScrawlError::InferenceFailure(format!(
                "model produced {} scores, expected {}",
                scores.len(),
                CLASS_COUNT
            )));
        }

        Ok(Array1::from_vec(scores))
    }
}
