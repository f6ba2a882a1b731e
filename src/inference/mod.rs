//! Inference module
//!
//! One forward pass per request: normalize the grid, score it, softmax the
//! scores, and report the winning digit with its confidence.

mod engine;

pub use engine::{InferenceEngine, InferenceStats, Prediction};
