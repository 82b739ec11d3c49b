//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationErrors;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, malformed or undecodable bearer token
    #[error("You must be authenticated")]
    Unauthenticated,

    /// No row with the requested id
    #[error("{0}")]
    NotFound(&'static str),

    /// Caller does not own the resource; reported as 401 like the
    /// authentication failures existing clients already handle
    #[error("{0}")]
    NotOwner(&'static str),

    /// Form validation failure
    #[error("Validation Failed")]
    Validation(ValidationErrors),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated | ApiError::NotOwner(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(e) if e.is_value_too_long() => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation(errors) => json!({
                "message": "Validation Failed",
                "errors": errors,
            }),
            ApiError::BadRequest(msg) => json!({ "message": msg }),
            ApiError::Database(e) if e.is_value_too_long() => json!({
                "message": "A value is too long for its field",
            }),
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                json!({ "message": "Database error" })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
