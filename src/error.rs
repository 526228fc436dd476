use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Error raised by the scheduling engine (services, validators, repositories).
///
/// The variant is the error kind callers match on programmatically; the
/// payload is the fixed, human-readable message surfaced to existing callers
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    NullInput(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    InvalidState(String),
}

impl DomainError {
    pub fn null_input(msg: &str) -> Self {
        DomainError::NullInput(msg.to_string())
    }

    pub fn invalid_argument(msg: &str) -> Self {
        DomainError::InvalidArgument(msg.to_string())
    }

    pub fn not_found(msg: &str) -> Self {
        DomainError::NotFound(msg.to_string())
    }

    #[allow(dead_code)]
    pub fn message(&self) -> &str {
        match self {
            DomainError::NullInput(m)
            | DomainError::InvalidArgument(m)
            | DomainError::NotFound(m)
            | DomainError::Conflict(m)
            | DomainError::InvalidRequest(m)
            | DomainError::InvalidState(m) => m,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorObject,
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(&'static str, String),
    NotFound(&'static str, String),
    Conflict(&'static str, String),
    #[allow(dead_code)]
    Internal(String),
}

impl ApiError {
    fn to_error_response(code: &str, message: &str) -> Json<ErrorResponse> {
        Json(ErrorResponse {
            error: ErrorObject {
                code: code.to_string(),
                message: message.to_string(),
            },
        })
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NullInput(msg) | DomainError::InvalidArgument(msg) => {
                ApiError::BadRequest("VALIDATION_ERROR", msg)
            }
            DomainError::InvalidRequest(msg) => ApiError::BadRequest("INVALID_REQUEST", msg),
            DomainError::NotFound(msg) => ApiError::NotFound("NOT_FOUND", msg),
            DomainError::Conflict(msg) => ApiError::Conflict("CONFLICT", msg),
            DomainError::InvalidState(msg) => ApiError::Conflict("INVALID_STATE", msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(code, msg) => {
                (StatusCode::BAD_REQUEST, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::NotFound(code, msg) => {
                (StatusCode::NOT_FOUND, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Conflict(code, msg) => {
                (StatusCode::CONFLICT, ApiError::to_error_response(code, &msg)).into_response()
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::to_error_response("INTERNAL", &msg),
            )
                .into_response(),
        }
    }
}
