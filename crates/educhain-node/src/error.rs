//! Error types for the Educhain node.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use educhain_permissions::PermissionError;
use serde::Serialize;
use thiserror::Error;

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running the node.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Admission control rejected an operation
    #[error("Permission error: {0}")]
    Permission(#[from] PermissionError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Body returned with every API rejection.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

/// A permission error rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PermissionError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            PermissionError::EmptyId => StatusCode::BAD_REQUEST,
            PermissionError::AlreadyExists(_) => StatusCode::CONFLICT,
            PermissionError::VoterNotAuthorized(_) => StatusCode::FORBIDDEN,
            PermissionError::TargetNotFound(_) | PermissionError::NotFound(_) => {
                StatusCode::NOT_FOUND
            }
            PermissionError::NoQuorum => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<PermissionError> for ApiError {
    fn from(e: PermissionError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: self.0.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
