//! Error types for the scrawl digit recognition service

use thiserror::Error;

/// Result type alias for scrawl operations
pub type Result<T> = std::result::Result<T, ScrawlError>;

/// Main error type for the scrawl service
#[derive(Error, Debug)]
pub enum ScrawlError {
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },

    #[error("Model unavailable: {path}: {reason}")]
    ModelUnavailable { path: String, reason: String },

    #[error("Inference failure: {0}")]
    InferenceFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ScrawlError {
    fn from(err: serde_json::Error) -> Self {
        ScrawlError::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrawlError::InvalidInputShape {
            expected: "28x28 grid".to_string(),
            actual: "27 rows".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input shape: expected 28x28 grid, got 27 rows"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ScrawlError = io_err.into();
        assert!(matches!(err, ScrawlError::IoError(_)));
    }

    #[test]
    fn test_inference_failure_display() {
        let err = ScrawlError::InferenceFailure("tensor rank mismatch".to_string());
        assert_eq!(err.to_string(), "Inference failure: tensor rank mismatch");
    }
}
