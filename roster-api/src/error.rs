//! Error handling for the API server
//!
//! All handlers return `ApiResult<T>`; `ApiError` turns into the response
//! the client sees:
//!
//! | variant | status | body |
//! |---|---|---|
//! | `InvalidId` | 400 | plain text `Invalid user ID` |
//! | `BadRequest` | 400 | `{"message": ...}` |
//! | `ValidationError` | 400 | `{"message": ...}` |
//! | `NotFound` | 404 | `{"message": ...}` |
//! | `InternalError` | 500 | `{"message": ...}` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_shared::error::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Body of a malformed id response
pub const INVALID_ID_MESSAGE: &str = "Invalid user ID";

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not a non-negative integer (400, plain text)
    InvalidId,

    /// Request body could not be parsed (400)
    BadRequest(String),

    /// Request body parsed but failed field validation (400)
    ValidationError(Vec<ValidationErrorDetail>),

    /// No such record (404)
    NotFound(String),

    /// Store failure, passed through to the client (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl fmt::Display for ValidationErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidId => f.write_str(INVALID_ID_MESSAGE),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                let joined: Vec<String> = errors.iter().map(ToString::to_string).collect();
                f.write_str(&joined.join("; "))
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidId => {
                return (StatusCode::BAD_REQUEST, INVALID_ID_MESSAGE).into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            err @ ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

/// Convert validator errors to API errors
///
/// Details are sorted by field so the message is stable.
impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut errors: Vec<ValidationErrorDetail> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));

        ApiError::ValidationError(errors)
    }
}
