//! User model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id BIGSERIAL PRIMARY KEY,
//!     name TEXT NOT NULL,
//!     address TEXT NOT NULL,
//!     sex TEXT NOT NULL
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use roster_shared::models::user::{Sex, User, UserFields};
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! let user = User::create(
//!     &pool,
//!     UserFields {
//!         name: "Ana".to_string(),
//!         address: "Jl. Merdeka".to_string(),
//!         sex: Sex::Female,
//!     },
//! )
//! .await?;
//!
//! let found = User::find_by_id(&pool, user.id).await?;
//! assert!(found.is_some());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Sex of a user
///
/// Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Returned when a string is neither `male` nor `female`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid sex {0:?}, expected \"male\" or \"female\"")]
pub struct InvalidSex(pub String);

impl Sex {
    /// Every accepted value, in wire form
    pub const ALLOWED: [&'static str; 2] = ["male", "female"];

    /// Converts to the string stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = InvalidSex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(InvalidSex(other.to_string())),
        }
    }
}

impl TryFrom<String> for Sex {
    type Error = InvalidSex;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A persisted user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    /// Identifier assigned by the database, never changes
    pub id: i64,

    pub name: String,

    pub address: String,

    #[sqlx(try_from = "String")]
    pub sex: Sex,
}

/// The mutable fields of a user
///
/// Used both to create a user and to replace an existing user's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub name: String,
    pub address: String,
    pub sex: Sex,
}

impl User {
    /// Builds the record for `id` carrying `fields`
    pub fn from_fields(id: i64, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name,
            address: fields.address,
            sex: fields.sex,
        }
    }

    /// Lists every user, ordered by id
    ///
    /// An empty table yields an empty vector.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, address, sex
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Finds a user by ID
    ///
    /// Returns `None` when no row matches.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, address, sex
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user and returns it with its assigned id
    pub async fn create(pool: &PgPool, data: UserFields) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, address, sex)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, sex
            "#,
        )
        .bind(data.name)
        .bind(data.address)
        .bind(data.sex.as_str())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Replaces name, address and sex of an existing user
    ///
    /// The id is left untouched. Returns the updated row, or `None` if the
    /// user doesn't exist.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        data: UserFields,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $2, address = $3, sex = $4
            WHERE id = $1
            RETURNING id, name, address, sex
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.address)
        .bind(data.sex.as_str())
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// Returns true if a row was removed, false if the user didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parses_allowed_values() {
        assert_eq!("male".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!("female".parse::<Sex>(), Ok(Sex::Female));
        for value in Sex::ALLOWED {
            assert_eq!(value.parse::<Sex>().map(|s| s.as_str()), Ok(value));
        }
    }

    #[test]
    fn test_sex_rejects_other_values() {
        assert!("Male".parse::<Sex>().is_err());
        assert!("".parse::<Sex>().is_err());
        assert_eq!(
            Sex::try_from("other".to_string()),
            Err(InvalidSex("other".to_string()))
        );
    }

    #[test]
    fn test_user_serializes_to_wire_shape() {
        let user = User::from_fields(
            1,
            UserFields {
                name: "Ana".to_string(),
                address: "Jl. Merdeka".to_string(),
                sex: Sex::Female,
            },
        );

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "name": "Ana",
                "address": "Jl. Merdeka",
                "sex": "female"
            })
        );
    }

    // Database-backed tests live in tests/user_repository_tests.rs
}
