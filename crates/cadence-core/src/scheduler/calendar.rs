//! Calendar aggregation over a user's dated plans.

use super::Scheduler;
use crate::error::Result;
use crate::models::CalendarReport;
use crate::params::CalendarQuery;

impl Scheduler {
    /// Builds a per-day completion report for the user's dated plans.
    ///
    /// Month and year filters apply independently; with neither set,
    /// every dated plan is included. Plans without a date never appear.
    pub async fn calendar_report(
        &self,
        user_id: &str,
        params: &CalendarQuery,
    ) -> Result<CalendarReport> {
        params.validate()?;

        let plans = self.plans_of(user_id).await?;
        let query = *params;
        let selected = plans.iter().filter(|plan| {
            plan.scheduled_date
                .as_deref()
                .is_some_and(|date| query.matches_date(date))
        });

        Ok(CalendarReport::from_plans(selected))
    }
}
