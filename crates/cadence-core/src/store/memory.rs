//! In-memory plan store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use jiff::Timestamp;

use crate::error::{Result, SchedulerError};
use crate::models::{NewPlan, Plan, PlanPatch};
use crate::timeofday;

use super::PlanStore;

/// Volatile plan store for tests and ephemeral sessions.
///
/// Holds the same data SQLite would, keyed by ID, and applies patches
/// with the same semantics. Contents are lost on drop.
pub struct MemoryStore {
    plans: Mutex<BTreeMap<u64, Plan>>,
    next_id: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            plans: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    fn lock_plans(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<u64, Plan>>> {
        self.plans.lock().map_err(|_| SchedulerError::Configuration {
            message: "In-memory store lock poisoned".to_string(),
        })
    }
}

impl PlanStore for MemoryStore {
    fn create(&self, plan: NewPlan) -> Result<Plan> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Timestamp::now();

        // Same normalize-or-drop rule as the SQLite store
        let scheduled_time = plan
            .scheduled_time
            .as_deref()
            .and_then(timeofday::normalize);

        let plan = Plan {
            id,
            user_id: plan.user_id,
            title: plan.title,
            description: plan.description,
            category: plan.category,
            subject: plan.subject,
            duration_minutes: plan.duration_minutes,
            scheduled_time,
            scheduled_date: plan.scheduled_date,
            status: plan.status,
            reminder_lead_minutes: plan.reminder_lead_minutes,
            auto_rescheduled: false,
            conflict_adjusted: false,
            related_mood_id: plan.related_mood_id,
            created_at: now,
            updated_at: now,
        };

        self.lock_plans()?.insert(id, plan.clone());
        Ok(plan)
    }

    fn get(&self, id: u64) -> Result<Option<Plan>> {
        Ok(self.lock_plans()?.get(&id).cloned())
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Plan>> {
        Ok(self
            .lock_plans()?
            .values()
            .filter(|plan| plan.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_all(&self) -> Result<Vec<Plan>> {
        Ok(self.lock_plans()?.values().cloned().collect())
    }

    fn update(&self, id: u64, patch: &PlanPatch) -> Result<Option<Plan>> {
        let mut plans = self.lock_plans()?;
        let Some(plan) = plans.get_mut(&id) else {
            return Ok(None);
        };
        apply_patch(plan, patch);
        Ok(Some(plan.clone()))
    }

    fn update_if_active(&self, id: u64, patch: &PlanPatch) -> Result<Option<Plan>> {
        let mut plans = self.lock_plans()?;
        let Some(plan) = plans.get_mut(&id) else {
            return Ok(None);
        };
        if !plan.is_active() {
            return Ok(None);
        }
        apply_patch(plan, patch);
        Ok(Some(plan.clone()))
    }

    fn delete(&self, id: u64) -> Result<bool> {
        Ok(self.lock_plans()?.remove(&id).is_some())
    }
}

fn apply_patch(plan: &mut Plan, patch: &PlanPatch) {
    if patch.is_empty() {
        return;
    }
    if let Some(ref title) = patch.title {
        plan.title = title.clone();
    }
    if let Some(ref description) = patch.description {
        plan.description = Some(description.clone());
    }
    if let Some(category) = patch.category {
        plan.category = category;
    }
    if let Some(ref subject) = patch.subject {
        plan.subject = Some(subject.clone());
    }
    if let Some(duration) = patch.duration_minutes {
        plan.duration_minutes = duration;
    }
    if let Some(ref time) = patch.scheduled_time {
        plan.scheduled_time = Some(time.clone());
    }
    if let Some(ref date) = patch.scheduled_date {
        plan.scheduled_date = Some(date.clone());
    }
    if let Some(status) = patch.status {
        plan.status = status;
    }
    if let Some(lead) = patch.reminder_lead_minutes {
        plan.reminder_lead_minutes = Some(lead);
    }
    if let Some(auto) = patch.auto_rescheduled {
        plan.auto_rescheduled = auto;
    }
    if let Some(adjusted) = patch.conflict_adjusted {
        plan.conflict_adjusted = adjusted;
    }
    plan.updated_at = Timestamp::now();
}
