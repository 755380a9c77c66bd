//! Error types for store operations
//!
//! Every fallible store operation returns one of these variants, so callers
//! can match on the outcome without inspecting database errors. The HTTP
//! layer relies on this: each variant maps to exactly one status code.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The caller's input was rejected before reaching the database
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No row exists for the requested id
    #[error("user is not present")]
    NotFound,

    /// A row exists but has been soft-deleted
    #[error("user has been deleted")]
    Deleted,

    /// The database rejected or failed the operation
    #[error("user {operation} failed")]
    Persistence {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Reject an id whose length rules out a well-formed UUID
    pub fn invalid_id_length(len: usize) -> Self {
        Self::InvalidInput(format!("user id length {len}"))
    }

    pub(crate) fn persistence(operation: &'static str, source: sqlx::Error) -> Self {
        Self::Persistence { operation, source }
    }
}
