//! Calendar aggregation types.
//!
//! The calendar report rolls a user's dated plans up by `YYYY-MM-DD`,
//! counting plans and minutes per status and deriving percentage
//! completion rates. Plans without a `scheduled_date` (legacy records)
//! never appear here.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus};

/// Per-day (or whole-report summary) plan statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DayStats {
    /// All plans dated on this day
    pub total: u32,
    /// Plans that reached `completed`
    pub completed: u32,
    /// Plans marked `missed`
    pub missed: u32,
    /// Plans still open (`pending`, `in_progress`, or `snoozed`)
    pub pending: u32,
    /// Sum of durations over all plans on the day
    pub planned_minutes: u32,
    /// Sum of durations over completed plans
    pub completed_minutes: u32,
    /// `completed / total`, as a percentage rounded to two decimals
    pub completion_rate: f64,
    /// `completed_minutes / planned_minutes`, as a percentage rounded to
    /// two decimals
    pub minutes_completion_rate: f64,
}

impl DayStats {
    fn add(&mut self, plan: &Plan) {
        self.total += 1;
        self.planned_minutes += plan.duration_minutes;
        match plan.status {
            PlanStatus::Completed => {
                self.completed += 1;
                self.completed_minutes += plan.duration_minutes;
            }
            PlanStatus::Missed => self.missed += 1,
            PlanStatus::Cancelled => {}
            PlanStatus::Pending | PlanStatus::InProgress | PlanStatus::Snoozed => {
                self.pending += 1;
            }
        }
    }

    fn finalize(&mut self) {
        self.completion_rate = percentage(self.completed, self.total);
        self.minutes_completion_rate = percentage(self.completed_minutes, self.planned_minutes);
    }
}

/// Percentage of `part` in `whole`, rounded to two decimals; zero when
/// `whole` is zero.
fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let raw = part as f64 / whole as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// A user's plans aggregated by calendar date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarReport {
    /// Per-day statistics keyed by `YYYY-MM-DD` (sorted by date)
    pub days: BTreeMap<String, DayStats>,
    /// The same statistics aggregated across every included day
    pub summary: DayStats,
}

impl CalendarReport {
    /// Builds a report from an iterator of dated plans.
    ///
    /// Callers are expected to have applied any month/year filtering
    /// already; undated plans are skipped here.
    pub fn from_plans<'a>(plans: impl IntoIterator<Item = &'a Plan>) -> Self {
        let mut days: BTreeMap<String, DayStats> = BTreeMap::new();
        let mut summary = DayStats::default();

        for plan in plans {
            let Some(date) = plan.scheduled_date.as_deref() else {
                continue;
            };
            days.entry(date.to_string()).or_default().add(plan);
            summary.add(plan);
        }

        for stats in days.values_mut() {
            stats.finalize();
        }
        summary.finalize();

        Self { days, summary }
    }
}
