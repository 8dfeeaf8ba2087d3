//! Persistence of targets.
//!
//! [`TargetStore`] is the only thing request handling knows about storage. The
//! canonical implementation is [`PostgresStore`]; a store instance is created
//! once at startup and shared by every request.

mod error;
pub mod postgres;

pub use error::StorageError;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use serde::Serialize;

/// A monitored target. `id` is assigned by the store and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub id: i64,
    pub name: String,
}

impl Target {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Storage capabilities needed by the targets resource.
///
/// Implementations are shared across concurrent requests, every call must be
/// atomic on its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Stores a new target and returns its freshly assigned id.
    async fn add(&self, name: &str) -> Result<i64, StorageError>;

    /// All targets, in creation order.
    async fn list(&self) -> Result<Vec<Target>, StorageError>;

    /// Removes the target, returning whether it existed.
    async fn delete(&self, id: i64) -> Result<bool, StorageError>;
}
