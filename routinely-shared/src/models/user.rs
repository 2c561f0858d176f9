/// User model and database operations
///
/// This module provides the User model and the CRUD operations behind
/// registration, login, password change, and account deletion.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id INTEGER PRIMARY KEY AUTOINCREMENT,
///     username TEXT NOT NULL UNIQUE,
///     password_hash TEXT NOT NULL
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use routinely_shared::models::user::{User, CreateUser};
/// use routinely_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// })
/// .await?;
///
/// let found = User::find_by_username(&pool, "alice").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use serde::Serialize;
use sqlx::SqlitePool;

use super::{StoreError, StoreResult};

/// User model representing an account
///
/// The username is set at registration and never changes afterwards; the
/// credential hash is mutated only by the password-change flow.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (assigned by the store)
    pub id: i64,

    /// Unique username
    pub username: String,

    /// Argon2id credential hash (PHC string format)
    pub password_hash: String,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Requested username (must not exist yet)
    pub username: String,

    /// Argon2id credential hash (NOT the plaintext password)
    pub password_hash: String,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateUsername` if the username is already
    /// taken (unique constraint), `StoreError::Database` otherwise.
    pub async fn create(pool: &SqlitePool, data: CreateUser) -> StoreResult<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateUsername
            }
            _ => StoreError::Database(e),
        })?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// Returns the user if found, `None` otherwise.
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> StoreResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// Returns the user if found, `None` otherwise.
    pub async fn find_by_username(pool: &SqlitePool, username: &str) -> StoreResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Replaces the stored credential hash
    ///
    /// Returns true if the user existed and was updated.
    pub async fn update_password_hash(
        pool: &SqlitePool,
        id: i64,
        password_hash: &str,
    ) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password_hash = ?
            WHERE id = ?
            "#,
        )
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a user row
    ///
    /// Owned tasks are removed separately (`Task::delete_all_for_user`)
    /// before this runs, matching the account-deletion flow.
    ///
    /// Returns true if the user was deleted, false if it didn't exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
