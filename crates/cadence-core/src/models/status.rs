//! Status and category enumerations for plans.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of plan lifecycle statuses.
///
/// `Completed` and `Cancelled` are terminal: a plan in either state
/// permanently exits conflict consideration and is never mutated again,
/// neither by lifecycle operations nor by the reschedule sweep.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Plan is scheduled and waiting
    #[default]
    Pending,

    /// Plan is being worked on
    InProgress,

    /// Plan finished successfully (terminal)
    Completed,

    /// Plan was abandoned by the user (terminal)
    Cancelled,

    /// Plan's window passed without completion. Observational only;
    /// the sweep reopens overdue plans as `Pending` instead
    Missed,

    /// Plan was pushed forward by the user
    Snoozed,
}

impl PlanStatus {
    /// Convert to the store string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "pending",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Cancelled => "cancelled",
            PlanStatus::Missed => "missed",
            PlanStatus::Snoozed => "snoozed",
        }
    }

    /// Whether this status permanently excludes a plan from scheduling.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlanStatus::Completed | PlanStatus::Cancelled)
    }
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(PlanStatus::Pending),
            "inprogress" | "in_progress" => Ok(PlanStatus::InProgress),
            "completed" => Ok(PlanStatus::Completed),
            "cancelled" => Ok(PlanStatus::Cancelled),
            "missed" => Ok(PlanStatus::Missed),
            "snoozed" => Ok(PlanStatus::Snoozed),
            _ => Err(format!("Invalid plan status: {s}")),
        }
    }
}

/// Type-safe enumeration of plan categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanCategory {
    Study,
    Work,
    Personal,
    #[default]
    Other,
}

impl PlanCategory {
    /// Convert to the store string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanCategory::Study => "study",
            PlanCategory::Work => "work",
            PlanCategory::Personal => "personal",
            PlanCategory::Other => "other",
        }
    }
}

impl FromStr for PlanCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "study" => Ok(PlanCategory::Study),
            "work" => Ok(PlanCategory::Work),
            "personal" => Ok(PlanCategory::Personal),
            "other" => Ok(PlanCategory::Other),
            _ => Err(format!("Invalid plan category: {s}")),
        }
    }
}
