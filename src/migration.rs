//! Schema setup for the user table
//!
//! The schema is applied at startup with CREATE TABLE IF NOT EXISTS, so
//! running it against an existing database is harmless. Timestamp columns
//! carry no SQL-side defaults: the store writes created_at and updated_at
//! explicitly on every mutation, from its injected clock.

use sqlx::SqlitePool;

use crate::errors::StoreError;

const USER_TABLE: &str = "
CREATE TABLE IF NOT EXISTS user (
    id CHAR(36) NOT NULL,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL,
    deleted_at DATETIME,
    PRIMARY KEY (id)
)
";

/// Create the user table if it does not exist yet
pub async fn apply_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    tracing::debug!("applying user table schema");
    sqlx::query(USER_TABLE)
        .execute(pool)
        .await
        .map_err(|e| StoreError::persistence("migrate", e))?;
    Ok(())
}
