//! # Roster API Server Library
//!
//! HTTP surface for managing users.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `doc`: OpenAPI document and Swagger UI paths
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod doc;
pub mod error;
pub mod routes;
