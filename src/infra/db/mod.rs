//! In-memory database: one lock around all three collections.

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

mod collections;

pub use collections::Collections;

/// Database wrapper owning every entity instance.
///
/// Constructed once at startup and shared through `Arc`. Any
/// check-then-mutate sequence must run under a single `write()` guard.
#[derive(Debug, Default)]
pub struct Database {
    collections: RwLock<Collections>,
}

/// Record counts reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
}

impl Database {
    /// Create an empty database.
    pub fn new() -> Self {
        tracing::info!("In-memory database initialized");
        Self::default()
    }

    /// Shared access for lookups.
    pub async fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections.read().await
    }

    /// Exclusive access for mutations.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections.write().await
    }

    pub async fn stats(&self) -> StoreStats {
        let store = self.read().await;
        StoreStats {
            students: store.students().len(),
            courses: store.courses().len(),
            enrollments: store.enrollments().len(),
        }
    }
}
