//! Plan persistence.
//!
//! The scheduler talks to storage through the [`PlanStore`] trait so the
//! SQLite backend and the in-memory backend are interchangeable. The
//! in-memory store backs tests and ephemeral sessions; SQLite is the
//! durable default.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::models::{NewPlan, Plan, PlanPatch};

/// Storage backend for plans.
///
/// Implementations are synchronous; the scheduler wraps calls in
/// `spawn_blocking` where it matters. Every method that touches a single
/// plan returns `Ok(None)` (or `Ok(false)` for delete) when the ID does
/// not exist, never an error.
pub trait PlanStore: Send + Sync {
    /// Persist a new plan and return it with its assigned ID and
    /// timestamps.
    fn create(&self, plan: NewPlan) -> Result<Plan>;

    /// Fetch a plan by ID.
    fn get(&self, id: u64) -> Result<Option<Plan>>;

    /// All plans belonging to one user, ordered by ID.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<Plan>>;

    /// Every plan in the store, ordered by ID.
    fn list_all(&self) -> Result<Vec<Plan>>;

    /// Apply a patch to a plan. Returns the updated plan, or `None` if
    /// the ID does not exist. Refreshes `updated_at`.
    fn update(&self, id: u64, patch: &PlanPatch) -> Result<Option<Plan>>;

    /// Apply a patch only while the plan is still active.
    ///
    /// The terminal-state check and the write happen atomically, so a
    /// plan completed or cancelled by a concurrent caller is never
    /// overwritten. Returns `None` when the plan is missing or already
    /// terminal.
    fn update_if_active(&self, id: u64, patch: &PlanPatch) -> Result<Option<Plan>>;

    /// Remove a plan. Returns whether a row was deleted.
    fn delete(&self, id: u64) -> Result<bool>;
}
