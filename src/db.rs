//! Database connection management
//!
//! Builds the SQLite connection pool from `DatabaseConfig`. An in-memory
//! database lives only as long as its connection, so for in-memory URLs the
//! pool is pinned to a single connection that is never reaped; a larger pool
//! would hand each connection its own empty database.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::errors::StoreError;
use config::DatabaseConfig;

/// Open a connection pool for the configured database
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| StoreError::persistence("connect", e))?
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds));

    if config.is_in_memory() {
        tracing::debug!("in-memory database, pinning pool to a single long-lived connection");
        pool_options = pool_options
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    } else {
        pool_options = pool_options
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

        // Set max lifetime if specified
        if config.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
        }
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| StoreError::persistence("connect", e))?;

    Ok(pool)
}

/// Check database connection health
pub async fn health_check(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1")
        .fetch_one(pool)
        .await
        .map_err(|e| StoreError::persistence("health check", e))?;
    Ok(())
}
