//! Errors raised by the data access layer
//!
//! Every repository operation returns `Result<T, StoreError>`. The API layer
//! decides how each variant maps onto an HTTP status.

use thiserror::Error;

/// Store error type
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row matched the requested id
    #[error("record not found")]
    NotFound,

    /// Any other failure reported by the database driver
    #[error(transparent)]
    Database(sqlx::Error),

    /// Schema migration failed
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// `RowNotFound` becomes `NotFound`; everything else is `Database`
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

impl StoreError {
    /// Returns true when the error means "no such record"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        assert_eq!(StoreError::NotFound.to_string(), "record not found");
        assert!(StoreError::NotFound.is_not_found());
    }

    #[test]
    fn test_database_error_is_transparent() {
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), sqlx::Error::PoolTimedOut.to_string());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::NotFound));
        assert_eq!(err.to_string(), "record not found");
    }
}
