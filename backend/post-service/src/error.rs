/// Error types for Post Service
///
/// This module defines all error types that can occur in the post-service.
/// Errors are converted to appropriate HTTP responses for API clients.
/// Server-side failures deliberately respond with an opaque message; the
/// underlying detail is logged, never sent to the client.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use std::fmt;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Request payload failed validation (bad content type, empty text)
    InvalidInput(String),

    /// Missing or invalid bearer token
    Unauthorized(String),

    /// Authenticated user is not allowed to perform the mutation
    Forbidden(String),

    /// Resource not found
    NotFound(String),

    /// Media storage or post persistence failed during upload
    UploadFailed(String),

    /// Database operation failed
    Database(String),

    /// Internal server error
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::UploadFailed(msg) => write!(f, "Upload failed: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl AppError {
    /// Message sent to the client. Client errors pass their message
    /// through; 5xx variants collapse to an opaque string.
    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(_)
            | AppError::Unauthorized(_)
            | AppError::Forbidden(_)
            | AppError::NotFound(_) => self.to_string(),
            AppError::UploadFailed(_) => "upload failed".to_string(),
            AppError::Database(_) | AppError::Internal(_) => "internal error".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UploadFailed(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.client_message(),
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
