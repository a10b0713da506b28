//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::ConflictingPlan;
use crate::timeofday;

use super::{PlanCategory, PlanStatus};

/// A user-owned, time-boxed task record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    /// Unique identifier, assigned by the store at creation
    pub id: u64,

    /// Owning user; set once at creation, never changed
    pub user_id: String,

    /// Title of the plan
    pub title: String,

    /// Detailed description of the plan
    pub description: Option<String>,

    /// Category of the plan (study/work/personal/other)
    #[serde(default)]
    pub category: PlanCategory,

    /// Optional free-text subject (e.g. a study topic)
    pub subject: Option<String>,

    /// Length of the plan's time window, 5-180 minutes
    pub duration_minutes: u32,

    /// Time of day the plan starts, normalized `HH:MM`; a plan may be
    /// unscheduled
    pub scheduled_time: Option<String>,

    /// Calendar date (`YYYY-MM-DD`) for calendar aggregation; legacy
    /// records may lack it
    pub scheduled_date: Option<String>,

    /// Lifecycle status of the plan
    #[serde(default)]
    pub status: PlanStatus,

    /// Minutes before `scheduled_time` to fire a reminder, 0-120
    pub reminder_lead_minutes: Option<u32>,

    /// Set by the reschedule sweep when it has moved this plan
    #[serde(default)]
    pub auto_rescheduled: bool,

    /// Set by the sweep when conflict resolution had to shift the new slot
    #[serde(default)]
    pub conflict_adjusted: bool,

    /// Opaque link to the mood entry this plan was derived from, if any
    pub related_mood_id: Option<String>,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Whether this plan still participates in scheduling.
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }

    /// The plan's half-open time window `[start, end)` in minutes since
    /// midnight, or `None` when the plan is unscheduled, its stored time
    /// is unparsable, or its duration is zero.
    pub fn interval(&self) -> Option<(u32, u32)> {
        if self.duration_minutes == 0 {
            return None;
        }
        let start = timeofday::parse_to_minutes(self.scheduled_time.as_deref()?)?;
        Some((start, start + self.duration_minutes))
    }
}

impl From<&Plan> for ConflictingPlan {
    fn from(plan: &Plan) -> Self {
        ConflictingPlan {
            id: plan.id,
            title: plan.title.clone(),
            scheduled_time: plan.scheduled_time.clone(),
            duration_minutes: plan.duration_minutes,
            status: plan.status.as_str().to_string(),
        }
    }
}

/// Field set for creating a plan; the store assigns id and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPlan {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: PlanCategory,
    pub subject: Option<String>,
    pub duration_minutes: u32,
    pub scheduled_time: Option<String>,
    pub scheduled_date: Option<String>,
    pub status: PlanStatus,
    pub reminder_lead_minutes: Option<u32>,
    pub related_mood_id: Option<String>,
}
