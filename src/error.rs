//! Error types for storage access and the HTTP surface
//!
//! Parsing and formatting never fail; only storage problems surface here.

use thiserror::Error;

/// Errors from the configuration file store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Config not found: {0}")]
    NotFound(String),

    #[error("Invalid config file name: {0:?}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the REST handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(feature = "server")]
mod response {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Json, Response},
    };
    use serde::Serialize;
    use tracing::{error, warn};

    use super::{ApiError, StorageError};

    #[derive(Debug, Serialize)]
    pub struct ErrorResponse {
        pub error: String,
    }

    impl ApiError {
        pub fn status(&self) -> StatusCode {
            match self {
                ApiError::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
                ApiError::Storage(StorageError::InvalidName(_)) => StatusCode::BAD_REQUEST,
                ApiError::Storage(StorageError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            let status = self.status();
            let message = if status.is_server_error() {
                error!("Request failed: {}", self);
                "Internal server error".to_string()
            } else {
                warn!("Request rejected: {}", self);
                self.to_string()
            };
            (status, Json(ErrorResponse { error: message })).into_response()
        }
    }
}

#[cfg(feature = "server")]
pub use response::ErrorResponse;
