use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationError;

use crate::dao::storage::StorageError;

/// Reasons a score submission is rejected before anything is persisted.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Body does not have the expected structure.
    #[error("{0}")]
    InvalidFormat(String),
    /// Initials are not a string of at most three characters.
    #[error("{0}")]
    InvalidInitials(ValidationError),
    /// Score is not a finite number.
    #[error("{0}")]
    InvalidScore(ValidationError),
    /// Score is below zero.
    #[error("{0}")]
    NegativeScore(ValidationError),
    /// Color is not a 24-bit hexadecimal value.
    #[error("{0}")]
    InvalidColor(ValidationError),
}

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The client sent an unusable submission.
    #[error(transparent)]
    InvalidSubmission(#[from] SubmissionError),
    /// Storage backend failed or could not be reached.
    #[error("storage failure")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Storage(err)
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("{0}")]
    BadRequest(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidSubmission(source) => AppError::BadRequest(source.to_string()),
            ServiceError::Storage(StorageError::Unavailable { .. }) => {
                AppError::Internal("Database connection failed".into())
            }
            ServiceError::Storage(source) => {
                AppError::Internal(format!("Database error: {}", source.cause()))
            }
        }
    }
}

/// JSON body returned with every error status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable reason naming the violated constraint or the backend failure.
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            error: self.to_string(),
        });

        (status, payload).into_response()
    }
}
