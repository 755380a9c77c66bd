//! Domain model types for user records
//!
//! `Entity` carries the columns every persisted record shares; `User` carries
//! the user-editable fields. `UserEntity` composes both into the full row
//! shape, flattened so the database row and the JSON representation stay flat.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Bookkeeping columns shared by persisted records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Entity {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entity {
    /// Whether the record has been soft-deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// User-editable fields
///
/// Deserialization defaults missing fields to empty strings, so a partial
/// update body carries "retain" implicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Full user row: bookkeeping columns plus user fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserEntity {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub entity: Entity,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub user: User,
}
