//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid storage backend: {0} (expected memory, file or db)")]
    InvalidBackend(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("DATABASE_URL is required when HBNB_TYPE_STORAGE=db")]
    MissingDatabaseUrl,
}

/// Failures raised by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("storage lock poisoned: {0}")]
    Lock(String),
    #[error("corrupt record {key}: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AppError {
    pub fn missing(field: &str) -> Self {
        AppError::BadRequest(format!("Missing {}", field))
    }

    pub fn invalid(field: &str) -> Self {
        AppError::BadRequest(format!("Invalid {}", field))
    }

    pub fn not_json() -> Self {
        AppError::BadRequest("Not a JSON".into())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(msg) => {
                tracing::warn!(reason = %msg, "rejected request");
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            AppError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
