//! Convenience re-exports for common userhaus usage
//!
//! This prelude re-exports the items most callers need, so a single use
//! statement covers the store, its models, and the configuration types.
//!
//! # Example
//!
//! ```rust
//! use userhaus::prelude::*;
//! ```

// Core store components
pub use crate::errors::StoreError;
pub use crate::identity::{Clock, IdGenerator, SystemClock, UuidIdGenerator, UUID_LENGTH};
pub use crate::model::{Entity, User, UserEntity};
pub use crate::store::{SqliteUserStore, UserStore};

// Connection and schema helpers
pub use crate::api::{self, DynUserStore};
pub use crate::db;
pub use crate::migration;

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, HttpConfig};

// Common external dependencies
pub use anyhow;
pub use async_trait;
pub use sqlx;
pub use tokio;

// Commonly used sqlx types
pub use sqlx::{FromRow, SqlitePool};
