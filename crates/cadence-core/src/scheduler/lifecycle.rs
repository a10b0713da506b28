//! Snooze and reminder operations.

use super::Scheduler;
use crate::error::{Result, SchedulerError};
use crate::models::{Plan, PlanPatch, PlanStatus};
use crate::params::{SetReminder, SnoozePlan};
use crate::timeofday;

impl Scheduler {
    /// Pushes a plan forward by the given number of minutes and marks it
    /// snoozed.
    ///
    /// The new time is the current scheduled time plus the offset,
    /// wrapping past midnight; an unscheduled plan is snoozed relative
    /// to the current wall-clock time. Snoozing deliberately skips
    /// conflict detection: the user asked to defer, and landing next to
    /// another plan is resolved later by the reschedule sweep.
    pub async fn snooze_plan(&self, user_id: &str, params: &SnoozePlan) -> Result<Plan> {
        params.validate()?;

        let _guard = self.lock_user(user_id).await?;

        let plan = self.fetch_owned(user_id, params.id).await?;
        if !plan.is_active() {
            return Err(SchedulerError::invalid_input(
                "id",
                format!("plan {} is already {}", plan.id, plan.status.as_str()),
            ));
        }

        let base = plan
            .scheduled_time
            .as_deref()
            .and_then(timeofday::parse_to_minutes)
            .unwrap_or_else(timeofday::current_minutes);
        let new_start = (base + params.minutes) % timeofday::MINUTES_PER_DAY;

        let id = params.id;
        let patch = PlanPatch {
            scheduled_time: Some(timeofday::minutes_to_hhmm(new_start)),
            status: Some(PlanStatus::Snoozed),
            ..Default::default()
        };

        self.run_store(move |store| store.update(id, &patch))
            .await?
            .ok_or(SchedulerError::PlanNotFound { id })
    }

    /// Sets how many minutes before the scheduled time a reminder should
    /// fire.
    pub async fn set_reminder(&self, user_id: &str, params: &SetReminder) -> Result<Plan> {
        params.validate()?;

        let _guard = self.lock_user(user_id).await?;

        self.fetch_owned(user_id, params.id).await?;

        let id = params.id;
        let patch = PlanPatch {
            reminder_lead_minutes: Some(params.lead_minutes),
            ..Default::default()
        };

        self.run_store(move |store| store.update(id, &patch))
            .await?
            .ok_or(SchedulerError::PlanNotFound { id })
    }
}
