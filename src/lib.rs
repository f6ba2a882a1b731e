//! Scrawl - Handwritten digit recognition service
//!
//! Serves a pre-trained convolutional digit classifier behind a minimal
//! web page: draw on a 28×28 grid in the browser, submit it as JSON, get
//! back the predicted digit and its confidence.
//!
//! # Modules
//!
//! - [`grid`] - Drawing grid validation and image conversion
//! - [`model`] - Model abstraction and ONNX artifact loading
//! - [`inference`] - Forward pass, softmax, and confidence
//! - [`monitoring`] - Latency and error statistics
//! - [`server`] - HTTP server with REST API and embedded drawing page
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Input and inference
pub mod grid;
pub mod model;
pub mod inference;

// Infrastructure
pub mod monitoring;

// Services
pub mod server;
pub mod cli;

pub use error::{Result, ScrawlError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{Result, ScrawlError};

    // Grid input
    pub use crate::grid::{Grid, GRID_CELLS, GRID_SIDE};

    // Model
    pub use crate::model::{DigitModel, ModelInfo, OnnxDigitModel, CLASS_COUNT};

    // Inference
    pub use crate::inference::{InferenceEngine, InferenceStats, Prediction};

    // Monitoring
    pub use crate::monitoring::{LatencySummary, PredictionMetrics};

    // Server
    pub use crate::server::{create_router, run_server, AppState, ServerConfig};
}
