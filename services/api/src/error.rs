//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{models::ScoreOutOfRange, password::PasswordError};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Signup with an email that is already registered
    #[error("Email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Interview result already stored under this candidate name
    #[error("Candidate name {0} already exists")]
    DuplicateCandidate(String),

    #[error(transparent)]
    ScoreOutOfRange(#[from] ScoreOutOfRange),

    /// Bad request with message
    #[error("{0}")]
    Validation(String),

    /// Login throttled after repeated failures
    #[error("Too many failed login attempts, try again later")]
    TooManyAttempts,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateEmail | ApiError::DuplicateCandidate(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::ScoreOutOfRange(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Password(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::DuplicateEmail => "duplicate_email",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::DuplicateCandidate(_) => "duplicate_candidate",
            ApiError::ScoreOutOfRange(_) => "score_out_of_range",
            ApiError::Validation(_) => "validation_error",
            ApiError::TooManyAttempts => "too_many_attempts",
            ApiError::Password(_) | ApiError::Database(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal details stay in the logs
        let error_message = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": error_message,
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Unreadable or incomplete request bodies are validation errors
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
