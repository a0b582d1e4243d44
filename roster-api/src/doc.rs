//! OpenAPI document
//!
//! [`ApiDoc`] collects the annotated handlers and their schemas. The router
//! serves it as JSON at `/api-docs/openapi.json` and through Swagger UI at
//! `/swagger`.

use crate::{error::ErrorResponse, routes};
use roster_shared::models::user::{Sex, User};
use utoipa::OpenApi;

/// OpenAPI document for the REST API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "Create, read, update and delete user records."
    ),
    paths(
        routes::users::list_users,
        routes::users::get_user,
        routes::users::create_user,
        routes::users::update_user,
        routes::users::delete_user,
        routes::health::health_check,
    ),
    components(schemas(
        User,
        Sex,
        routes::users::UserPayload,
        ErrorResponse,
        routes::health::HealthResponse
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Path of the generated JSON document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Mount point of Swagger UI
pub const SWAGGER_UI_PATH: &str = "/swagger";
