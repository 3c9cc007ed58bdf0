use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::services::{FeedbackError, SignupError};

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    Conflict(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                error: error_message,
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::ValidationError(rejection.body_text())
    }
}

impl From<SignupError> for ApiError {
    fn from(err: SignupError) -> Self {
        match err {
            SignupError::AlreadySignedUp => Self::Conflict(err.to_string()),
            SignupError::Store(e) => Self::InternalError(e.to_string()),
            SignupError::MissingFields
            | SignupError::InvalidEmail
            | SignupError::InvalidPricePoint => Self::ValidationError(err.to_string()),
        }
    }
}

impl From<FeedbackError> for ApiError {
    fn from(err: FeedbackError) -> Self {
        match err {
            FeedbackError::Store(e) => Self::InternalError(e.to_string()),
            FeedbackError::MissingFields | FeedbackError::InvalidRating => {
                Self::ValidationError(err.to_string())
            }
        }
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_errors_map_to_status() {
        let conflict = ApiError::from(SignupError::AlreadySignedUp).into_response();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let invalid = ApiError::from(SignupError::InvalidEmail).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let store = ApiError::from(SignupError::Store(anyhow::anyhow!("disk full"))).into_response();
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_feedback_errors_map_to_status() {
        let invalid = ApiError::from(FeedbackError::InvalidRating).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }
}
