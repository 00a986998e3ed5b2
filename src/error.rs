//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned for every 5xx response. Details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

// == Proxy Error Enum ==
/// Unified error type for the proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Key does not exist (in the backing store, or in the cache on remove)
    #[error("key not found: {0}")]
    NotFound(String),

    /// The backing store could not answer
    #[error("backing store error for key '{key}': {message}")]
    Backend { key: String, message: String },

    /// Invalid request data or configuration
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ProxyError {
    /// Builds a [`ProxyError::Backend`] for the given key.
    pub fn backend(key: impl Into<String>, message: impl ToString) -> Self {
        ProxyError::Backend {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Returns the HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (status, message).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
