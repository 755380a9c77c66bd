//! HTTP surface for the user store
//!
//! Routes live under /v1 and speak JSON. Handlers are thin: they translate
//! between the wire and the `UserStore` trait, with every store error mapped
//! to a fixed status code and a small error envelope.

use std::sync::Arc;

use crate::store::UserStore;

pub mod handlers;
pub mod server;

pub use server::{router, serve};

/// Shared store handle the handlers run against
pub type DynUserStore = Arc<dyn UserStore>;
