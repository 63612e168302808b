use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::service::ServiceError;

pub mod account;
pub mod message;

/// Everything a handler can fail with, already tied to a status code.
#[derive(Debug)]
#[must_use]
pub enum ApiError {
    Validation(String),
    Conflict,
    Unauthorized,
    NotFound,
    Internal,
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation(reason) => Self::Validation(reason),
            ServiceError::Conflict => Self::Conflict,
            ServiceError::Unauthorized => Self::Unauthorized,
            ServiceError::Database(error) => {
                tracing::error!(?error, "Unhandled database error");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(reason) => (StatusCode::BAD_REQUEST, reason).into_response(),
            Self::Conflict => StatusCode::CONFLICT.into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
