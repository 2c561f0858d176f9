/// Database connection pool management
///
/// This module provides the SQLite connection pool used by every handler.
/// Each request-scoped operation acquires a connection from the pool, runs
/// its single statement, and releases the connection when it drops.
///
/// # Example
///
/// ```no_run
/// use routinely_shared::db::pool::{create_pool, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig {
///         path: "routinely.db".to_string(),
///         max_connections: 5,
///         create_if_missing: true,
///     };
///
///     let pool = create_pool(config).await?;
///
///     let row: (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&pool)
///         .await?;
///
///     Ok(())
/// }
/// ```

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

/// Configuration for the database connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file
    ///
    /// `:memory:` gives a throwaway in-memory database; pair it with
    /// `max_connections: 1`, since every connection would otherwise see its
    /// own empty database.
    pub path: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Whether to create the database file when it does not exist
    pub create_if_missing: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "routinely.db".to_string(),
            max_connections: 5,
            create_if_missing: true,
        }
    }
}

/// Creates and initializes the SQLite connection pool
///
/// Foreign keys are enabled on every connection, and a health check runs
/// before the pool is handed out.
///
/// # Errors
///
/// Returns an error if the database file cannot be opened or the health
/// check fails.
pub async fn create_pool(config: DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    info!(
        path = %config.path,
        max_connections = config.max_connections,
        "Creating database connection pool"
    );

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(config.create_if_missing)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    health_check(&pool).await?;

    info!("Database connection pool created successfully");
    Ok(pool)
}

/// Performs a health check on the database connection
///
/// # Errors
///
/// Returns an error if the health check query fails
pub async fn health_check(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i32,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "routinely.db");
        assert_eq!(config.max_connections, 5);
        assert!(config.create_if_missing);
    }

    #[tokio::test]
    async fn test_create_pool_in_memory() {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
            max_connections: 1,
            create_if_missing: true,
        };

        let pool = create_pool(config).await.expect("pool should connect");
        health_check(&pool).await.expect("health check should pass");
    }
}
