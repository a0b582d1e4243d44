//! API route handlers
//!
//! - `health`: Health check endpoint
//! - `users`: User CRUD endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod health;
pub mod users;

/// Success envelope: `{"data": ...}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
