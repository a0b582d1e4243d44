//! Common test utilities for integration tests
//!
//! - In-memory and failing `UserRepository` implementations
//! - Router construction
//! - Request helpers

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use roster_api::app::{build_router, AppState};
use roster_api::config::{ApiConfig, Config, DatabaseConfig, LogFormat, LoggingConfig};
use roster_shared::error::StoreError;
use roster_shared::models::user::{User, UserFields};
use roster_shared::repository::UserRepository;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Repository keeping users in a map; ids start at 1
#[derive(Default)]
pub struct MemoryUserRepository {
    inner: Mutex<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl MemoryUserRepository {
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub fn get(&self, id: i64) -> Option<User> {
        self.inner.lock().unwrap().users.get(&id).cloned()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().unwrap().users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        self.get(id).ok_or(StoreError::NotFound)
    }

    async fn create(&self, fields: UserFields) -> Result<User, StoreError> {
        let mut state = self.inner.lock().unwrap();
        state.last_id += 1;
        let user = User::from_fields(state.last_id, fields);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_by_id(&self, id: i64, fields: UserFields) -> Result<User, StoreError> {
        let mut state = self.inner.lock().unwrap();
        let slot = state.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        *slot = User::from_fields(id, fields);
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.lock().unwrap().users.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Repository whose every call fails as if the connection dropped
pub struct FailingUserRepository;

pub const FAILURE_TEXT: &str = "connection lost";

fn failure() -> StoreError {
    StoreError::Database(sqlx::Error::Protocol(FAILURE_TEXT.to_string()))
}

#[async_trait]
impl UserRepository for FailingUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Err(failure())
    }

    async fn get_by_id(&self, _id: i64) -> Result<User, StoreError> {
        Err(failure())
    }

    async fn create(&self, _fields: UserFields) -> Result<User, StoreError> {
        Err(failure())
    }

    async fn update_by_id(&self, _id: i64, _fields: UserFields) -> Result<User, StoreError> {
        Err(failure())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<bool, StoreError> {
        Err(failure())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(failure())
    }
}

/// Repository that panics on listing
pub struct PanickingUserRepository;

#[async_trait]
impl UserRepository for PanickingUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        panic!("list_all exploded");
    }

    async fn get_by_id(&self, _id: i64) -> Result<User, StoreError> {
        Err(StoreError::NotFound)
    }

    async fn create(&self, _fields: UserFields) -> Result<User, StoreError> {
        Err(failure())
    }

    async fn update_by_id(&self, _id: i64, _fields: UserFields) -> Result<User, StoreError> {
        Err(failure())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgresql://localhost/roster_test".to_string(),
            max_connections: 1,
        },
        logging: LoggingConfig {
            format: LogFormat::Pretty,
        },
    }
}

/// Response captured for assertions
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body)
            .unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.body))
    }
}

/// Test context wrapping a router over an in-memory store
pub struct TestContext {
    pub app: axum::Router,
    pub users: Arc<MemoryUserRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserRepository::default());
        let app = build_router(AppState::new(users.clone(), test_config()));
        Self { app, users }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        send(&self.app, "GET", uri, None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        send(&self.app, "DELETE", uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        send(&self.app, "POST", uri, Some(body.to_string())).await
    }

    pub async fn put_json(&self, uri: &str, body: Value) -> TestResponse {
        send(&self.app, "PUT", uri, Some(body.to_string())).await
    }

    /// Creates a user through the API and returns its id
    pub async fn create_user(&self, name: &str, address: &str, sex: &str) -> i64 {
        let response = self
            .post_json(
                "/users",
                serde_json::json!({ "name": name, "address": address, "sex": sex }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.json()["data"]["id"].as_i64().unwrap()
    }
}

/// Router over an arbitrary repository
pub fn app_with(users: Arc<dyn UserRepository>) -> axum::Router {
    build_router(AppState::new(users, test_config()))
}

/// Sends a request; `json_body` is sent with a JSON content type
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    json_body: Option<String>,
) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match json_body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
