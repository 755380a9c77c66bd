//! # userhaus
//!
//! A user service built around a soft-deleting data access layer over
//! SQLite. The store hands out 36-character UUID ids, stamps every mutation
//! from an injected clock, and never removes rows: deletion marks a record
//! and later reads and writes refuse it. A thin axum layer exposes the same
//! operations over HTTP.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use userhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load()?;
//!
//!     let pool = db::connect(&config.database).await?;
//!     migration::apply_schema(&pool).await?;
//!
//!     let store = SqliteUserStore::new(pool);
//!
//!     let created = store.create(User::new("Ada", "Lovelace")).await?;
//!     println!("created user {}", created.entity.id);
//!
//!     let fetched = store.fetch_by_id(&created.entity.id).await?;
//!     println!("hello, {} {}", fetched.user.first_name, fetched.user.last_name);
//!
//!     store.delete(&created.entity.id).await?;
//!     assert!(matches!(
//!         store.fetch_by_id(&created.entity.id).await,
//!         Err(StoreError::Deleted)
//!     ));
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod db;
pub mod errors;
pub mod identity;
pub mod migration;
pub mod model;
pub mod prelude;
pub mod store;

// Re-export the main public types for convenience
pub use errors::StoreError;
pub use identity::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
pub use model::{Entity, User, UserEntity};
pub use store::{SqliteUserStore, UserStore};

// Re-export centralized config
pub use config::{AppConfig, DatabaseConfig, HttpConfig};

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
