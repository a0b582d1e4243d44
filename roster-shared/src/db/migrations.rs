//! Schema migrations
//!
//! Migrations live in `migrations/` at the workspace root and are embedded
//! into the binary at compile time. Running them at startup creates the
//! `users` table when it does not exist yet.

use crate::error::StoreError;
use sqlx::{migrate::MigrateDatabase, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Applies every pending migration
///
/// Already-applied migrations are skipped, so this is safe to call on every
/// start.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    info!("Starting database migrations");

    match sqlx::migrate!("../migrations").run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e.into())
        }
    }
}

/// Creates the database named in `database_url` if it doesn't exist
///
/// Useful for development and tests; in production the database should
/// already exist and this is a no-op.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}
