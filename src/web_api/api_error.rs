use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{error_response::ErrorResponse, task_store::StoreError};

/// Every failure a task handler can produce. Rendered as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("Task not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    /// The store failed. Only `message` reaches the client.
    #[error("{message}")]
    Internal {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn internal(message: &'static str) -> impl FnOnce(StoreError) -> ApiError {
        move |source| ApiError::Internal { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, source } = &self {
            tracing::error!(error = %source, "{message}");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
