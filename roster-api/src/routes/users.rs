//! User endpoints
//!
//! # Endpoints
//!
//! - `GET /users` - List users
//! - `GET /users/:id` - Get a user
//! - `POST /users` - Create a user
//! - `PUT /users/:id` - Replace a user's fields
//! - `DELETE /users/:id` - Delete a user
//!
//! Successful responses wrap their payload as `{"data": ...}`; failures carry
//! `{"message": ...}`, except a malformed id which answers with plain text.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ErrorResponse},
    routes::DataResponse,
};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use roster_shared::models::user::{Sex, User, UserFields};
use serde::Deserialize;
use std::borrow::Cow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Create/update request body
///
/// Missing fields deserialize as empty strings so that they are reported by
/// validation rather than as a parse failure.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "is required"))]
    pub address: String,

    /// Must be `male` or `female`
    #[serde(default)]
    #[validate(custom(function = "validate_sex"))]
    pub sex: String,
}

impl UserPayload {
    /// Validates the payload and converts it into store input
    pub fn into_fields(self) -> ApiResult<UserFields> {
        self.validate()?;

        let sex = self
            .sex
            .parse::<Sex>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(UserFields {
            name: self.name,
            address: self.address,
            sex,
        })
    }
}

fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    if sex.is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some(Cow::Borrowed("is required"));
        return Err(err);
    }

    if sex.parse::<Sex>().is_err() {
        let mut err = ValidationError::new("oneof");
        err.message = Some(Cow::Owned(format!(
            "must be one of: {}",
            Sex::ALLOWED.join(", ")
        )));
        return Err(err);
    }

    Ok(())
}

/// Parses a path id as a non-negative integer
pub fn parse_user_id(raw: &str) -> ApiResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 0 => Ok(id),
        _ => Err(ApiError::InvalidId),
    }
}

/// Extracts the id segment; a segment axum can't decode is also an invalid id
fn user_id(path: Result<Path<String>, PathRejection>) -> ApiResult<i64> {
    let Path(raw) = path.map_err(|_| ApiError::InvalidId)?;
    parse_user_id(&raw)
}

fn parse_payload(payload: Result<Json<UserPayload>, JsonRejection>) -> ApiResult<UserFields> {
    let Json(payload) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    payload.into_fields()
}

/// List users
///
/// ```text
/// GET /users
/// ```
///
/// ```json
/// { "data": [ { "id": 1, "name": "Ana", "address": "Jl. Merdeka", "sex": "female" } ] }
/// ```
///
/// An empty store answers `{"data": []}`.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "Every stored user", body = DataResponse<Vec<User>>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Vec<User>>>> {
    let users = state.users.list_all().await?;
    Ok(Json(DataResponse::new(users)))
}

/// Get a user
///
/// # Errors
///
/// - `400 Bad Request`: id is not a non-negative integer (plain text)
/// - `404 Not Found`: no user with this id
/// - `500 Internal Server Error`: store failure
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user", body = DataResponse<User>),
        (status = 400, description = "Invalid user ID", body = String, content_type = "text/plain"),
        (status = 404, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DataResponse<User>>> {
    let id = user_id(path)?;
    let user = state.users.get_by_id(id).await?;
    Ok(Json(DataResponse::new(user)))
}

/// Create a user
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// { "name": "Ana", "address": "Jl. Merdeka", "sex": "female" }
/// ```
///
/// Responds `201 Created` with the stored user, including its new id.
///
/// # Errors
///
/// - `400 Bad Request`: malformed body or failed validation
/// - `500 Internal Server Error`: store failure
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = DataResponse<User>),
        (status = 400, description = "Malformed body or failed validation", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<User>>)> {
    let fields = parse_payload(payload)?;

    let user = state.users.create(fields).await?;
    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(DataResponse::new(user))))
}

/// Replace a user's name, address and sex
///
/// The body is validated exactly like [`create_user`]. The id never changes.
///
/// # Errors
///
/// - `400 Bad Request`: malformed id (plain text), malformed body or failed validation
/// - `404 Not Found`: no user with this id
/// - `500 Internal Server Error`: store failure
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = DataResponse<User>),
        (status = 400, description = "Malformed body or failed validation; a malformed id answers with plain text `Invalid user ID`", body = ErrorResponse),
        (status = 404, description = "No user with this id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<Json<DataResponse<User>>> {
    let id = user_id(path)?;
    let fields = parse_payload(payload)?;

    let user = state.users.update_by_id(id, fields).await?;
    tracing::info!(user_id = id, "User updated");

    Ok(Json(DataResponse::new(user)))
}

/// Delete a user
///
/// Responds `204 No Content` whether or not the user existed.
///
/// # Errors
///
/// - `400 Bad Request`: malformed id (plain text)
/// - `500 Internal Server Error`: store failure
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted, or did not exist"),
        (status = 400, description = "Invalid user ID", body = String, content_type = "text/plain"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = user_id(path)?;

    if state.users.delete_by_id(id).await? {
        tracing::info!(user_id = id, "User deleted");
    }

    Ok(StatusCode::NO_CONTENT)
}
