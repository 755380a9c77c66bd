//! Integration tests for the SQLite user store
//!
//! Each test opens its own in-memory database, so tests are isolated and
//! need no external setup. Id and clock policies are swapped for
//! deterministic doubles where a test depends on them.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use userhaus::prelude::*;

/// Id source that hands out the same id on every call
struct FixedId(&'static str);

impl IdGenerator for FixedId {
    fn generate(&self) -> String {
        self.0.to_string()
    }
}

/// Clock pinned to a settable instant
struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

async fn setup_pool() -> SqlitePool {
    let pool = db::connect(&DatabaseConfig::default())
        .await
        .expect("failed to open in-memory database");
    migration::apply_schema(&pool)
        .await
        .expect("failed to apply schema");
    pool
}

async fn setup_store() -> SqliteUserStore {
    SqliteUserStore::new(setup_pool().await)
}

/// A well-formed id that no test inserts
fn absent_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[tokio::test]
async fn test_create_returns_persisted_entity() {
    let store = setup_store().await;

    let created = store.create(User::new("Ada", "Lovelace")).await.unwrap();
    assert_eq!(created.entity.id.len(), UUID_LENGTH);
    assert_eq!(created.user.first_name, "Ada");
    assert_eq!(created.user.last_name, "Lovelace");
    assert_eq!(created.entity.created_at, created.entity.updated_at);
    assert!(created.entity.deleted_at.is_none());

    let fetched = store.fetch_by_id(&created.entity.id).await.unwrap();
    assert_eq!(fetched.entity.id, created.entity.id);
    assert_eq!(fetched.user, created.user);
}

#[tokio::test]
async fn test_create_accepts_empty_names() {
    let store = setup_store().await;

    let created = store.create(User::default()).await.unwrap();
    let fetched = store.fetch_by_id(&created.entity.id).await.unwrap();
    assert_eq!(fetched.user.first_name, "");
    assert_eq!(fetched.user.last_name, "");
}

#[tokio::test]
async fn test_fetch_rejects_malformed_id_length() {
    let store = setup_store().await;

    let err = store.fetch_by_id("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));

    let too_long = "0195d3a4-9c4e-7b13-a2f1-08d2c1e44b10x";
    let err = store.fetch_by_id(too_long).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
}

#[tokio::test]
async fn test_length_check_runs_before_any_backend_access() {
    let pool = setup_pool().await;
    let store = SqliteUserStore::new(pool.clone());
    pool.close().await;

    // Malformed ids are rejected without touching the closed pool.
    let err = store.fetch_by_id("short").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
    let err = store.update("short", User::new("A", "B")).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));
    let err = store.delete("short").await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidInput(_)));

    // A well-formed id does reach the pool and surfaces its failure.
    let err = store.fetch_by_id(&absent_id()).await.unwrap_err();
    assert!(matches!(err, StoreError::Persistence { .. }));
}

#[tokio::test]
async fn test_fetch_missing_user_is_not_found() {
    let store = setup_store().await;

    let err = store.fetch_by_id(&absent_id()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn test_fetch_deleted_user_is_gone() {
    let store = setup_store().await;

    let created = store.create(User::new("Ada", "Lovelace")).await.unwrap();
    store.delete(&created.entity.id).await.unwrap();

    let err = store.fetch_by_id(&created.entity.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Deleted));
}

#[tokio::test]
async fn test_fetch_all_on_empty_table_returns_empty_vec() {
    let store = setup_store().await;

    let users = store.fetch_all().await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_fetch_all_keeps_insertion_order_and_hides_deleted() {
    let store = setup_store().await;

    let first = store.create(User::new("test", "one")).await.unwrap();
    let second = store.create(User::new("test", "two")).await.unwrap();
    let third = store.create(User::new("test", "three")).await.unwrap();

    store.delete(&second.entity.id).await.unwrap();

    let users = store.fetch_all().await.unwrap();
    let ids: Vec<&str> = users.iter().map(|u| u.entity.id.as_str()).collect();
    assert_eq!(ids, vec![first.entity.id.as_str(), third.entity.id.as_str()]);
}

#[tokio::test]
async fn test_update_replaces_only_non_empty_fields() {
    let store = setup_store().await;
    let created = store.create(User::new("Ada", "Lovelace")).await.unwrap();

    let updated = store
        .update(&created.entity.id, User::new("", "Hopper"))
        .await
        .unwrap();
    assert_eq!(updated.user.first_name, "Ada");
    assert_eq!(updated.user.last_name, "Hopper");

    let updated = store
        .update(&created.entity.id, User::new("Grace", ""))
        .await
        .unwrap();
    assert_eq!(updated.user.first_name, "Grace");
    assert_eq!(updated.user.last_name, "Hopper");

    let fetched = store.fetch_by_id(&created.entity.id).await.unwrap();
    assert_eq!(fetched.user, User::new("Grace", "Hopper"));
}

#[tokio::test]
async fn test_update_refreshes_updated_at_but_not_created_at() {
    let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();

    let clock = Arc::new(ManualClock::new(t1));
    let store = SqliteUserStore::with_policies(
        setup_pool().await,
        Arc::new(UuidIdGenerator),
        clock.clone(),
    );

    let created = store.create(User::new("Ada", "Lovelace")).await.unwrap();
    assert_eq!(created.entity.created_at, t1);
    assert_eq!(created.entity.updated_at, t1);

    clock.set(t2);
    // Both fields empty keeps the stored values but still counts as a write.
    let updated = store
        .update(&created.entity.id, User::default())
        .await
        .unwrap();
    assert_eq!(updated.user, created.user);
    assert_eq!(updated.entity.created_at, t1);
    assert_eq!(updated.entity.updated_at, t2);

    let fetched = store.fetch_by_id(&created.entity.id).await.unwrap();
    assert_eq!(fetched.entity.created_at, t1);
    assert_eq!(fetched.entity.updated_at, t2);
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let store = setup_store().await;

    let err = store
        .update(&absent_id(), User::new("Ada", "Lovelace"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound));

    // A failed update is not an upsert.
    assert!(store.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_deleted_user_is_gone() {
    let store = setup_store().await;

    let created = store.create(User::new("Ada", "Lovelace")).await.unwrap();
    store.delete(&created.entity.id).await.unwrap();

    let err = store
        .update(&created.entity.id, User::new("Grace", "Hopper"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Deleted));
}

#[tokio::test]
async fn test_delete_marks_row_and_refreshes_updated_at() {
    let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();

    let pool = setup_pool().await;
    let clock = Arc::new(ManualClock::new(t1));
    let store =
        SqliteUserStore::with_policies(pool.clone(), Arc::new(UuidIdGenerator), clock.clone());

    let created = store.create(User::new("Ada", "Lovelace")).await.unwrap();
    clock.set(t2);
    store.delete(&created.entity.id).await.unwrap();

    // The row survives deletion; inspect it directly.
    let (deleted_at, updated_at): (Option<DateTime<Utc>>, DateTime<Utc>) =
        sqlx::query_as("SELECT deleted_at, updated_at FROM user WHERE id = ?")
            .bind(&created.entity.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(deleted_at, Some(t2));
    assert_eq!(updated_at, t2);
}

#[tokio::test]
async fn test_delete_twice_reports_gone() {
    let store = setup_store().await;

    let created = store.create(User::new("Ada", "Lovelace")).await.unwrap();
    store.delete(&created.entity.id).await.unwrap();

    let err = store.delete(&created.entity.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Deleted));
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let store = setup_store().await;

    let err = store.delete(&absent_id()).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound));
}

#[tokio::test]
async fn test_duplicate_generated_id_surfaces_as_persistence_error() {
    let store = SqliteUserStore::with_policies(
        setup_pool().await,
        Arc::new(FixedId("0195d3a4-9c4e-7b13-a2f1-08d2c1e44b10")),
        Arc::new(SystemClock),
    );

    store.create(User::new("test", "one")).await.unwrap();

    // Same id again violates the primary key.
    let err = store.create(User::new("test", "two")).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Persistence {
            operation: "create",
            ..
        }
    ));
}

#[tokio::test]
async fn test_concurrent_creates_share_one_store() {
    let store = setup_store().await;

    let (a, b, c, d) = tokio::join!(
        store.create(User::new("test", "a")),
        store.create(User::new("test", "b")),
        store.create(User::new("test", "c")),
        store.create(User::new("test", "d")),
    );
    let ids = [
        a.unwrap().entity.id,
        b.unwrap().entity.id,
        c.unwrap().entity.id,
        d.unwrap().entity.id,
    ];
    for (i, id) in ids.iter().enumerate() {
        assert!(!ids[i + 1..].contains(id), "duplicate id generated");
    }

    let users = store.fetch_all().await.unwrap();
    assert_eq!(users.len(), 4);
}
