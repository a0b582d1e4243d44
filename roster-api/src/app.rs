//! Application state and router builder
//!
//! The state is built once at startup and cloned into every handler. It owns
//! no mutable data: the store handle is the only thing requests share.
//!
//! # Example
//!
//! ```no_run
//! use roster_api::{app::{build_router, AppState}, config::Config};
//! use roster_shared::repository::PgUserRepository;
//! use sqlx::PgPool;
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! let pool = PgPool::connect(&config.database.url).await?;
//! let state = AppState::new(Arc::new(PgUserRepository::new(pool)), config);
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    config::Config,
    doc::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH},
    error::ErrorResponse,
    routes,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use roster_shared::repository::UserRepository;
use std::{any::Any, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub users: Arc<dyn UserRepository>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self {
            users,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── GET    /swagger              # Swagger UI
/// ├── GET    /api-docs/openapi.json
/// ├── GET    /users
/// ├── POST   /users
/// ├── GET    /users/:id
/// ├── PUT    /users/:id
/// └── DELETE /users/:id
/// ```
///
/// Every request is logged by `TraceLayer`. A panicking handler is turned
/// into a 500 by `CatchPanicLayer` instead of taking the connection down.
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/:id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(user_routes)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("internal server error")),
    )
        .into_response()
}
