//! Partial-update request passed to the plan store.

use super::{PlanCategory, PlanStatus};

/// A partial field set merged onto an existing plan by
/// [`PlanStore::update`](crate::store::PlanStore::update).
///
/// `Some` fields overwrite; `None` fields are left untouched. The store
/// refreshes `updated_at` on every applied patch. `scheduled_time` must
/// already be normalized `HH:MM`; callers normalize (or drop the field)
/// before building a patch, the store never persists a raw string.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<PlanCategory>,
    pub subject: Option<String>,
    pub duration_minutes: Option<u32>,
    pub scheduled_time: Option<String>,
    pub scheduled_date: Option<String>,
    pub status: Option<PlanStatus>,
    pub reminder_lead_minutes: Option<u32>,
    pub auto_rescheduled: Option<bool>,
    pub conflict_adjusted: Option<bool>,
}

impl PlanPatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.subject.is_none()
            && self.duration_minutes.is_none()
            && self.scheduled_time.is_none()
            && self.scheduled_date.is_none()
            && self.status.is_none()
            && self.reminder_lead_minutes.is_none()
            && self.auto_rescheduled.is_none()
            && self.conflict_adjusted.is_none()
    }
}
