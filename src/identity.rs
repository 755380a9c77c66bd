//! Identifier and timestamp policies
//!
//! The store never calls `Uuid::new_v4` or `Utc::now` directly. Both are
//! injected behind traits so tests can pin ids and timestamps to known
//! values while production wiring uses the real sources.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Length of a hyphenated UUID string, the only id shape the store accepts
pub const UUID_LENGTH: usize = 36;

/// Source of new record identifiers
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Source of the current time for created_at / updated_at / deleted_at
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production id source: random v4 UUIDs in hyphenated form
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Production clock: UTC wall time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
