//! HTTP-facing error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use orderlens_common::OrderLensError;
use thiserror::Error;
use tracing::error;

/// Errors a request handler can answer with
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed query parameters
    #[error("{0}")]
    BadRequest(String),

    /// Unknown chart or resource
    #[error("{0}")]
    NotFound(String),

    /// Rendering or serialization failed
    #[error(transparent)]
    Internal(#[from] OrderLensError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Internal(err) => {
                error!(error = %err, "Request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
