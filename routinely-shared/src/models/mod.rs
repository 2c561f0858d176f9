/// Database models for Routinely
///
/// This module contains both database models and their CRUD operations.
/// Every operation is a single parameterized SQL statement.
///
/// # Models
///
/// - `user`: User accounts (username + credential hash)
/// - `task`: One-off and recurring tasks with due dates
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
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;

/// Error type for store operations
///
/// Each handler matches on these variants and makes its own recovery
/// decision (silent redirect, flash message, or a logged 500).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced user row does not exist
    #[error("user not found")]
    UserNotFound,

    /// A user row with the requested username already exists
    #[error("username already taken")]
    DuplicateUsername,

    /// The referenced task row does not exist for the requesting user
    #[error("task not found")]
    TaskNotFound,

    /// Any other database failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;
