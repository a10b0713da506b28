//! Parameter structures for scheduler operations.
//!
//! These structures carry operation inputs across interface boundaries
//! (CLI today, other transports later) without framework-specific
//! derives. Interface layers wrap them with their own argument types and
//! convert via `From`; validation of business rules lives here so every
//! interface enforces the same bounds.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::models::{PlanCategory, PlanStatus};
use crate::timeofday;

/// Default plan length when a create request omits one.
pub const DEFAULT_DURATION_MINUTES: u32 = 30;

/// Allowed plan duration range, minutes (inclusive).
pub const DURATION_RANGE: std::ops::RangeInclusive<u32> = 5..=180;

/// Maximum reminder lead, minutes.
pub const MAX_REMINDER_LEAD_MINUTES: u32 = 120;

/// Maximum snooze, minutes (exclusive lower bound of zero).
pub const MAX_SNOOZE_MINUTES: u32 = 240;

/// Generic parameters for operations requiring just a plan ID.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the plan to operate on
    pub id: u64,
}

/// Parameters for creating a new plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    /// Title of the plan (required)
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Category of the plan
    #[serde(default)]
    pub category: PlanCategory,
    /// Optional free-text subject
    pub subject: Option<String>,
    /// Plan length in minutes; defaults to 30 when omitted
    pub duration_minutes: Option<u32>,
    /// Start time of day, any parseable clock string
    pub scheduled_time: Option<String>,
    /// Calendar date, `YYYY-MM-DD`
    pub scheduled_date: Option<String>,
    /// Reminder lead in minutes before the start, 0-120
    pub reminder_lead_minutes: Option<u32>,
    /// Mood entry this plan was derived from, if any
    pub related_mood_id: Option<String>,
}

impl CreatePlan {
    /// Validate creation parameters.
    ///
    /// # Errors
    ///
    /// `SchedulerError::InvalidInput` when the title is blank, the
    /// duration or reminder lead is out of range, or a provided
    /// scheduled time/date cannot be parsed.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SchedulerError::invalid_input("title", "must not be empty"));
        }
        if let Some(duration) = self.duration_minutes {
            validate_duration(duration)?;
        }
        if let Some(lead) = self.reminder_lead_minutes {
            validate_reminder_lead(lead)?;
        }
        if let Some(ref time) = self.scheduled_time {
            validate_time(time)?;
        }
        if let Some(ref date) = self.scheduled_date {
            validate_date(date)?;
        }
        Ok(())
    }
}

/// Parameters for partially updating an existing plan.
///
/// Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlan {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<PlanCategory>,
    pub subject: Option<String>,
    pub duration_minutes: Option<u32>,
    pub scheduled_time: Option<String>,
    pub scheduled_date: Option<String>,
    pub status: Option<PlanStatus>,
    pub reminder_lead_minutes: Option<u32>,
}

impl UpdatePlan {
    /// Validate update parameters (same bounds as creation).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(SchedulerError::invalid_input("title", "must not be empty"));
            }
        }
        if let Some(duration) = self.duration_minutes {
            validate_duration(duration)?;
        }
        if let Some(lead) = self.reminder_lead_minutes {
            validate_reminder_lead(lead)?;
        }
        if let Some(ref time) = self.scheduled_time {
            validate_time(time)?;
        }
        if let Some(ref date) = self.scheduled_date {
            validate_date(date)?;
        }
        Ok(())
    }
}

/// Parameters for snoozing a plan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SnoozePlan {
    /// Plan to snooze
    pub id: u64,
    /// Minutes to push the plan forward, in (0, 240]
    pub minutes: u32,
}

impl SnoozePlan {
    /// Validate the snooze offset.
    pub fn validate(&self) -> Result<()> {
        if self.minutes == 0 || self.minutes > MAX_SNOOZE_MINUTES {
            return Err(SchedulerError::invalid_input(
                "minutes",
                format!("must be greater than 0 and at most {MAX_SNOOZE_MINUTES}"),
            ));
        }
        Ok(())
    }
}

/// Parameters for setting a plan's reminder lead.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SetReminder {
    /// Plan to set the reminder on
    pub id: u64,
    /// Minutes before the scheduled time to fire the reminder, 0-120
    pub lead_minutes: u32,
}

impl SetReminder {
    /// Validate the reminder lead.
    pub fn validate(&self) -> Result<()> {
        validate_reminder_lead(self.lead_minutes)
    }
}

/// Parameters for listing a user's plans.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListPlans {
    /// Keep only plans in this category
    pub category: Option<PlanCategory>,
    /// Keep only plans with this status
    pub status: Option<PlanStatus>,
}

/// Parameters for the calendar aggregate.
///
/// `month` and `year` are each applied only when provided; both absent
/// means every dated plan is included.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CalendarQuery {
    /// Calendar month, 1-12
    pub month: Option<u8>,
    /// Calendar year, e.g. 2024
    pub year: Option<i16>,
}

impl CalendarQuery {
    /// Validate the month bound.
    pub fn validate(&self) -> Result<()> {
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(SchedulerError::invalid_input("month", "must be 1-12"));
            }
        }
        Ok(())
    }

    /// Whether a `YYYY-MM-DD` date string falls inside this query.
    pub fn matches_date(&self, date: &str) -> bool {
        if let Some(year) = self.year {
            if date.get(0..4).and_then(|s| s.parse::<i16>().ok()) != Some(year) {
                return false;
            }
        }
        if let Some(month) = self.month {
            if date.get(5..7).and_then(|s| s.parse::<u8>().ok()) != Some(month) {
                return false;
            }
        }
        true
    }
}

fn validate_duration(duration: u32) -> Result<()> {
    if !DURATION_RANGE.contains(&duration) {
        return Err(SchedulerError::invalid_input(
            "duration_minutes",
            format!(
                "must be between {} and {} minutes",
                DURATION_RANGE.start(),
                DURATION_RANGE.end()
            ),
        ));
    }
    Ok(())
}

fn validate_reminder_lead(lead: u32) -> Result<()> {
    if lead > MAX_REMINDER_LEAD_MINUTES {
        return Err(SchedulerError::invalid_input(
            "lead_minutes",
            format!("must be at most {MAX_REMINDER_LEAD_MINUTES}"),
        ));
    }
    Ok(())
}

fn validate_time(time: &str) -> Result<()> {
    if timeofday::parse_to_minutes(time).is_none() {
        return Err(SchedulerError::invalid_input(
            "scheduled_time",
            format!("'{time}' is not a valid time of day"),
        ));
    }
    Ok(())
}

fn validate_date(date: &str) -> Result<()> {
    let bytes = date.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && date[0..4].chars().all(|c| c.is_ascii_digit())
        && date[5..7].chars().all(|c| c.is_ascii_digit())
        && date[8..10].chars().all(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(SchedulerError::invalid_input(
            "scheduled_date",
            format!("'{date}' is not a YYYY-MM-DD date"),
        ));
    }
    Ok(())
}
