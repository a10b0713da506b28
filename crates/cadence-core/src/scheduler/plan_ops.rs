//! Plan CRUD operations with conflict enforcement.

use super::Scheduler;
use crate::conflict;
use crate::error::{Result, SchedulerError};
use crate::models::{NewPlan, Plan, PlanFilter, PlanPatch, PlanStatus};
use crate::params::{CreatePlan, Id, ListPlans, UpdatePlan, DEFAULT_DURATION_MINUTES};
use crate::timeofday;

impl Scheduler {
    /// Creates a new plan for the given user.
    ///
    /// When the plan carries a scheduled time, the requested window is
    /// checked against every other active plan of the same user and the
    /// create is rejected with [`SchedulerError::TimeConflict`] on
    /// overlap. The check and the insert happen under the user's lock,
    /// so a concurrent create cannot slip into the same window.
    pub async fn create_plan(&self, user_id: &str, params: &CreatePlan) -> Result<Plan> {
        params.validate()?;

        let duration = params.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        let scheduled_time = params
            .scheduled_time
            .as_deref()
            .and_then(timeofday::normalize);

        let _guard = self.lock_user(user_id).await?;

        if let Some(start) = scheduled_time
            .as_deref()
            .and_then(timeofday::parse_to_minutes)
        {
            let plans = self.plans_of(user_id).await?;
            if let Some(existing) = conflict::find_conflict(&plans, start, duration, None) {
                return Err(SchedulerError::TimeConflict {
                    existing: existing.into(),
                });
            }
        }

        let new_plan = NewPlan {
            user_id: user_id.to_string(),
            title: params.title.clone(),
            description: params.description.clone(),
            category: params.category,
            subject: params.subject.clone(),
            duration_minutes: duration,
            scheduled_time,
            scheduled_date: params.scheduled_date.clone(),
            status: PlanStatus::Pending,
            reminder_lead_minutes: params.reminder_lead_minutes,
            related_mood_id: params.related_mood_id.clone(),
        };

        self.run_store(move |store| store.create(new_plan)).await
    }

    /// Retrieves a plan by its ID, enforcing ownership.
    pub async fn get_plan(&self, user_id: &str, params: &Id) -> Result<Plan> {
        self.fetch_owned(user_id, params.id).await
    }

    /// Lists the user's plans with optional filtering.
    pub async fn list_plans(&self, user_id: &str, params: &ListPlans) -> Result<Vec<Plan>> {
        let filter = PlanFilter::from(params);
        let plans = self.plans_of(user_id).await?;
        Ok(plans
            .into_iter()
            .filter(|plan| filter.matches(plan))
            .collect())
    }

    /// Applies a partial update to a plan, enforcing ownership.
    ///
    /// The conflict check runs against the plan's prospective state: the
    /// new time, duration, and status where provided, the stored values
    /// otherwise. A plan moving into a terminal status is not checked,
    /// and the plan's own current window never blocks its update.
    pub async fn update_plan(&self, user_id: &str, id: u64, params: &UpdatePlan) -> Result<Plan> {
        params.validate()?;

        let _guard = self.lock_user(user_id).await?;

        let current = self.fetch_owned(user_id, id).await?;

        let new_time = match params.scheduled_time {
            Some(ref time) => timeofday::normalize(time),
            None => current.scheduled_time.clone(),
        };
        let new_duration = params.duration_minutes.unwrap_or(current.duration_minutes);
        let new_status = params.status.unwrap_or(current.status);

        if !new_status.is_terminal() {
            if let Some(start) = new_time.as_deref().and_then(timeofday::parse_to_minutes) {
                let plans = self.plans_of(user_id).await?;
                if let Some(existing) =
                    conflict::find_conflict(&plans, start, new_duration, Some(id))
                {
                    return Err(SchedulerError::TimeConflict {
                        existing: existing.into(),
                    });
                }
            }
        }

        let patch = PlanPatch {
            title: params.title.clone(),
            description: params.description.clone(),
            category: params.category,
            subject: params.subject.clone(),
            duration_minutes: params.duration_minutes,
            scheduled_time: params
                .scheduled_time
                .as_deref()
                .and_then(timeofday::normalize),
            scheduled_date: params.scheduled_date.clone(),
            status: params.status,
            reminder_lead_minutes: params.reminder_lead_minutes,
            ..Default::default()
        };

        self.run_store(move |store| store.update(id, &patch))
            .await?
            .ok_or(SchedulerError::PlanNotFound { id })
    }

    /// Deletes a plan, enforcing ownership. Returns the removed plan.
    pub async fn delete_plan(&self, user_id: &str, params: &Id) -> Result<Plan> {
        let _guard = self.lock_user(user_id).await?;

        let plan = self.fetch_owned(user_id, params.id).await?;
        let id = params.id;
        let deleted = self.run_store(move |store| store.delete(id)).await?;
        if !deleted {
            return Err(SchedulerError::PlanNotFound { id });
        }
        Ok(plan)
    }

    /// Fetches a plan and verifies it belongs to `user_id`.
    pub(crate) async fn fetch_owned(&self, user_id: &str, id: u64) -> Result<Plan> {
        let plan = self
            .run_store(move |store| store.get(id))
            .await?
            .ok_or(SchedulerError::PlanNotFound { id })?;
        if plan.user_id != user_id {
            return Err(SchedulerError::Forbidden { id });
        }
        Ok(plan)
    }

    /// All plans belonging to one user.
    pub(crate) async fn plans_of(&self, user_id: &str) -> Result<Vec<Plan>> {
        let user_id = user_id.to_string();
        self.run_store(move |store| store.list_for_user(&user_id))
            .await
    }
}
