//! User store: CRUD over the user table with soft deletion
//!
//! `UserStore` is the seam between the HTTP layer and persistence; handlers
//! and tests program against the trait, `SqliteUserStore` is the production
//! implementation. Deletion never removes rows. A record with deleted_at set
//! stays in the table, is invisible to reads, and rejects further writes.
//!
//! Fetching a missing user is an error, while listing an empty table returns
//! an empty vec. Callers iterate a list but dereference a single fetch, so
//! the two absences deliberately surface differently.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::errors::StoreError;
use crate::identity::{Clock, IdGenerator, SystemClock, UuidIdGenerator, UUID_LENGTH};
use crate::model::{Entity, User, UserEntity};

const CREATE_USER: &str =
    "INSERT INTO user (id, first_name, last_name, created_at, updated_at) VALUES (?, ?, ?, ?, ?)";

// Selects deleted rows too; visibility is decided in code so a deleted
// record can be told apart from a missing one.
const FETCH_USER: &str =
    "SELECT id, first_name, last_name, created_at, updated_at, deleted_at FROM user WHERE id = ?";

const FETCH_ALL_USERS: &str = "SELECT id, first_name, last_name, created_at, updated_at, deleted_at \
     FROM user WHERE deleted_at IS NULL ORDER BY rowid";

const UPDATE_USER: &str =
    "UPDATE user SET first_name = ?, last_name = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL";

const DELETE_USER: &str =
    "UPDATE user SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL";

/// Data access operations for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return the stored entity
    async fn create(&self, user: User) -> Result<UserEntity, StoreError>;

    /// Fetch an active user by id
    async fn fetch_by_id(&self, id: &str) -> Result<UserEntity, StoreError>;

    /// List all active users in insertion order
    async fn fetch_all(&self) -> Result<Vec<UserEntity>, StoreError>;

    /// Merge non-empty fields into an active user and return the result
    async fn update(&self, id: &str, user: User) -> Result<UserEntity, StoreError>;

    /// Soft-delete an active user
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

/// SQLite-backed `UserStore`
///
/// Holds a connection pool plus the id and clock policies, so the struct is
/// cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl SqliteUserStore {
    /// Create a store with the production policies: random v4 UUIDs and UTC
    /// wall time
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_policies(pool, Arc::new(UuidIdGenerator), Arc::new(SystemClock))
    }

    /// Create a store with explicit id and clock policies
    pub fn with_policies(
        pool: SqlitePool,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { pool, ids, clock }
    }

    fn check_id(id: &str) -> Result<(), StoreError> {
        if id.len() != UUID_LENGTH {
            return Err(StoreError::invalid_id_length(id.len()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create(&self, user: User) -> Result<UserEntity, StoreError> {
        let now = self.clock.now();
        let entity = UserEntity {
            entity: Entity {
                id: self.ids.generate(),
                created_at: now,
                updated_at: now,
                deleted_at: None,
            },
            user,
        };

        sqlx::query(CREATE_USER)
            .bind(&entity.entity.id)
            .bind(&entity.user.first_name)
            .bind(&entity.user.last_name)
            .bind(entity.entity.created_at)
            .bind(entity.entity.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::persistence("create", e))?;

        tracing::debug!(id = %entity.entity.id, "created user");
        Ok(entity)
    }

    async fn fetch_by_id(&self, id: &str) -> Result<UserEntity, StoreError> {
        Self::check_id(id)?;

        let row = sqlx::query_as::<_, UserEntity>(FETCH_USER)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::persistence("fetch", e))?;

        match row {
            None => Err(StoreError::NotFound),
            Some(entity) if entity.entity.is_deleted() => Err(StoreError::Deleted),
            Some(entity) => Ok(entity),
        }
    }

    async fn fetch_all(&self) -> Result<Vec<UserEntity>, StoreError> {
        sqlx::query_as::<_, UserEntity>(FETCH_ALL_USERS)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::persistence("fetch all", e))
    }

    async fn update(&self, id: &str, user: User) -> Result<UserEntity, StoreError> {
        Self::check_id(id)?;

        let current = self.fetch_by_id(id).await?;

        // Non-empty fields replace, empty fields retain the stored value.
        let mut merged = current.user;
        if !user.first_name.is_empty() {
            merged.first_name = user.first_name;
        }
        if !user.last_name.is_empty() {
            merged.last_name = user.last_name;
        }

        let now = self.clock.now();
        let result = sqlx::query(UPDATE_USER)
            .bind(&merged.first_name)
            .bind(&merged.last_name)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::persistence("update", e))?;

        // The row was active a moment ago, so a miss means a concurrent
        // delete won; nothing was written.
        if result.rows_affected() == 0 {
            return Err(StoreError::Deleted);
        }

        Ok(UserEntity {
            entity: Entity {
                updated_at: now,
                ..current.entity
            },
            user: merged,
        })
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        Self::check_id(id)?;

        self.fetch_by_id(id).await?;

        let now = self.clock.now();
        let result = sqlx::query(DELETE_USER)
            .bind(now)
            .bind(now)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::persistence("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Deleted);
        }

        tracing::debug!(id = %id, "soft-deleted user");
        Ok(())
    }
}
