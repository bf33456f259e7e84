use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Failure kinds surfaced by the human service.
///
/// Every internal failure is translated into one of these at the service
/// boundary; the HTTP layer only looks at the status code and the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or missing request data.
    InvalidInput(String),
    /// No matching record (an empty listing counts too).
    NotFound(String),
    /// An enrichment lookup failed on the network or returned garbage.
    UpstreamUnavailable(String),
    /// Record store failure other than not-found.
    StorageError(String),
}

impl AppError {
    /// HTTP status carried by this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UpstreamUnavailable(_) | AppError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message sent back to the client.
    pub fn message(&self) -> &str {
        match self {
            AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::UpstreamUnavailable(msg)
            | AppError::StorageError(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into a `{"error": "..."}` body at its status code.
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Enrichment lookup failed: {}", msg);
            }
            AppError::StorageError(msg) => {
                tracing::error!("Storage error: {}", msg);
            }
            AppError::InvalidInput(msg) | AppError::NotFound(msg) => {
                tracing::debug!("Request rejected with {}: {}", status, msg);
            }
        }

        let body = Json(json!({
            "error": self.message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::InvalidInput("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::UpstreamUnavailable("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::StorageError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let response = AppError::NotFound("human does not exist".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "human does not exist"}));
    }
}
