//! Database models
//!
//! - `user`: The `User` record and its queries

pub mod user;
