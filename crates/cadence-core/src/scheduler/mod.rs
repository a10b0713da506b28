//! High-level scheduler API for managing plans.
//!
//! This module provides the main [`Scheduler`] interface. The scheduler
//! coordinates between interface layers and the plan store, implementing
//! all business logic: ownership checks, validation, conflict detection,
//! snooze and reminder handling, and calendar aggregation.
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Scheduler`] instances
//! - [`plan_ops`]: Plan CRUD operations with conflict enforcement
//! - [`lifecycle`]: Snooze and reminder operations
//! - [`calendar`]: Per-day completion aggregation
//!
//! The reschedule sweep lives in [`crate::sweep`] and is implemented on
//! the same `Scheduler` type.
//!
//! ## Concurrency
//!
//! Every read-check-write sequence runs while holding a per-user async
//! mutex, so two operations on the same user's plans cannot interleave
//! between the conflict check and the write. Operations for different
//! users proceed in parallel. Store calls go through `spawn_blocking`
//! since the backends are synchronous.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;
use tokio::task;

use crate::error::{Result, SchedulerError};
use crate::store::PlanStore;

pub mod builder;
pub mod calendar;
pub mod lifecycle;
pub mod plan_ops;

#[cfg(test)]
mod tests;

pub use builder::SchedulerBuilder;

/// Main scheduler interface for managing plans.
pub struct Scheduler {
    pub(crate) store: Arc<dyn PlanStore>,
    locks: UserLocks,
}

impl Scheduler {
    /// Creates a scheduler on top of an existing store.
    pub(crate) fn new(store: Arc<dyn PlanStore>) -> Self {
        Self {
            store,
            locks: UserLocks::default(),
        }
    }

    /// Serializes operations touching one user's plans.
    pub(crate) async fn lock_user(&self, user_id: &str) -> Result<OwnedMutexGuard<()>> {
        self.locks.acquire(user_id).await
    }

    /// Runs a synchronous store operation off the async runtime.
    pub(crate) async fn run_store<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PlanStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| SchedulerError::Configuration {
                message: format!("Task join error: {e}"),
            })?
    }
}

/// Map of per-user async mutexes.
///
/// Guards are owned so they can be held across `spawn_blocking` calls.
/// Entries are created on demand and never removed; the per-user cost is
/// one `Arc<Mutex<()>>`.
#[derive(Default)]
struct UserLocks {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl UserLocks {
    async fn acquire(&self, user_id: &str) -> Result<OwnedMutexGuard<()>> {
        let lock = {
            let mut map = self
                .inner
                .lock()
                .map_err(|_| SchedulerError::Configuration {
                    message: "User lock table poisoned".to_string(),
                })?;
            Arc::clone(
                map.entry(user_id.to_string())
                    .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(()))),
            )
        };
        Ok(lock.lock_owned().await)
    }
}
