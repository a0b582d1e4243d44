//! # Roster Shared Library
//!
//! Data access for the Roster user service: connection pooling, schema
//! migrations, the `User` model and the repository the API server talks to.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Database models and their queries
//! - `repository`: `UserRepository` trait and its PostgreSQL implementation
//! - `error`: Store error type

pub mod db;
pub mod error;
pub mod models;
pub mod repository;

/// Current version of the Roster shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
