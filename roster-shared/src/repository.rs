//! User repository
//!
//! `UserRepository` is the seam between request handlers and the store.
//! Handlers hold an `Arc<dyn UserRepository>`; production wires in
//! [`PgUserRepository`], tests can substitute their own implementation.
//!
//! # Example
//!
//! ```no_run
//! use roster_shared::db::pool::{create_pool, DatabaseConfig};
//! use roster_shared::repository::{PgUserRepository, UserRepository};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::with_url("postgresql://localhost/roster")).await?;
//! let users = PgUserRepository::new(pool);
//!
//! for user in users.list_all().await? {
//!     println!("{} lives at {}", user.name, user.address);
//! }
//! # Ok(())
//! # }
//! ```

use crate::{
    db::pool,
    error::StoreError,
    models::user::{User, UserFields},
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// Read and write operations on users
///
/// Each call is a single statement against the store; nothing spans calls.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every stored user. An empty store is not an error.
    async fn list_all(&self) -> Result<Vec<User>, StoreError>;

    /// The user with `id`, or `StoreError::NotFound`
    async fn get_by_id(&self, id: i64) -> Result<User, StoreError>;

    /// Stores a new user and returns it with its assigned id
    async fn create(&self, fields: UserFields) -> Result<User, StoreError>;

    /// Replaces the mutable fields of user `id`
    ///
    /// Fails with `StoreError::NotFound` if the user doesn't exist.
    async fn update_by_id(&self, id: i64, fields: UserFields) -> Result<User, StoreError>;

    /// Removes user `id`
    ///
    /// Deleting an unknown id succeeds. Returns whether a row was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Checks that the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed repository
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(User::list(&self.pool).await?)
    }

    async fn get_by_id(&self, id: i64) -> Result<User, StoreError> {
        User::find_by_id(&self.pool, id)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, fields: UserFields) -> Result<User, StoreError> {
        let user = User::create(&self.pool, fields).await?;
        debug!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update_by_id(&self, id: i64, fields: UserFields) -> Result<User, StoreError> {
        let user = User::update(&self.pool, id, fields)
            .await?
            .ok_or(StoreError::NotFound)?;
        debug!(user_id = id, "Updated user");
        Ok(user)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let deleted = User::delete(&self.pool, id).await?;
        debug!(user_id = id, deleted, "Deleted user");
        Ok(deleted)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
