//! Monitoring module
//!
//! Per-process latency and error tracking for the prediction path.

mod metrics;

pub use metrics::{LatencySummary, PredictionMetrics};
