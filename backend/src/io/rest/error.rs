//! Translation of handler failures into HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{ErrorResponse, FieldError};
use tracing::error;

use crate::domain::models::PageRequestError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    BadRequest(String),
    #[error("Not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn body(message: &str, code: &str, field_errors: Vec<FieldError>) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: message.to_string(),
            code: code.to_string(),
            field_errors,
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(field_errors) => (
                StatusCode::BAD_REQUEST,
                Self::body("Validation failed", "VALIDATION_ERROR", field_errors),
            )
                .into_response(),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Self::body(&message, "INVALID_REQUEST", Vec::new()),
            )
                .into_response(),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal(e) => {
                // Do not leak storage details to clients
                error!("Request failed: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Self::body("Internal server error", "INTERNAL_ERROR", Vec::new()),
                )
                    .into_response()
            }
        }
    }
}

impl From<PageRequestError> for ApiError {
    fn from(err: PageRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
