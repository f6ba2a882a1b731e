//! Application state management

use std::sync::Arc;

use crate::inference::InferenceEngine;
use crate::model::{DigitModel, ModelInfo};

use super::ServerConfig;

/// Application state shared across handlers
///
/// Everything here is built once at startup and read-only afterwards, so
/// handlers share it behind a plain `Arc` with no interior locking.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: InferenceEngine,
    pub model_info: ModelInfo,
}

impl AppState {
    pub fn new(config: ServerConfig, model: Arc<dyn DigitModel>, model_info: ModelInfo) -> Self {
        Self {
            config,
            engine: InferenceEngine::new(model),
            model_info,
        }
    }

    /// Get system information
    pub fn get_system_info(&self) -> serde_json::Value {
        use sysinfo::System;

        let mut sys = System::new_all();
        sys.refresh_all();

        // Calculate overall CPU usage
        let cpu_usage: f32 =
            sys.cpus().iter().map(|c| c.cpu_usage()).sum::<f32>() / sys.cpus().len() as f32;

        serde_json::json!({
            "cpu_count": sys.cpus().len(),
            "cpu_usage": cpu_usage,
            "total_memory_gb": sys.total_memory() as f64 / 1024.0 / 1024.0 / 1024.0,
            "used_memory_gb": sys.used_memory() as f64 / 1024.0 / 1024.0 / 1024.0,
            "memory_usage_percent": (sys.used_memory() as f64 / sys.total_memory() as f64) * 100.0,
        })
    }
}
