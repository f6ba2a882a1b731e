//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::ScrawlError;

/// Status marker carried by every failure body, mirroring the "Success."
/// marker on the happy path.
const STATUS_FAILED: &str = "Failed.";

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Scrawl(#[from] ScrawlError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Scrawl(err) => match err {
                // Caller mistakes echo the full diagnostic
                ScrawlError::InvalidInputShape { .. } => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                ScrawlError::ModelUnavailable { .. } => {
                    tracing::error!(detail = %err, "Model unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Model unavailable. Check server logs for details.".to_string(),
                    )
                }
                ScrawlError::InferenceFailure(detail) => {
                    tracing::error!(detail = %detail, "Inference failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Inference failed. Check server logs for details.".to_string(),
                    )
                }
                ScrawlError::IoError(e) => {
                    tracing::error!(detail = %e, "IO error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "A file system error occurred".to_string(),
                    )
                }
                ScrawlError::SerializationError(e) => {
                    tracing::error!(detail = %e, "Serialization error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "status": STATUS_FAILED,
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_maps_to_bad_request() {
        let err = ServerError::from(ScrawlError::InvalidInputShape {
            expected: "28x28 grid".to_string(),
            actual: "3 rows".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_inference_failure_maps_to_internal_error() {
        let err = ServerError::from(ScrawlError::InferenceFailure("boom".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
