//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so presentation details stay
//! out of the business types.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{CalendarReport, DayStats, Plan, PlanCategory, PlanStatus};
use crate::sweep::{SweepStats, SweepTotals};

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for PlanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Category: {}", self.category)?;
        if let Some(subject) = &self.subject {
            writeln!(f, "- Subject: {subject}")?;
        }
        match (&self.scheduled_date, &self.scheduled_time) {
            (Some(date), Some(time)) => writeln!(f, "- Scheduled: {date} at {time}")?,
            (Some(date), None) => writeln!(f, "- Scheduled: {date}")?,
            (None, Some(time)) => writeln!(f, "- Scheduled: {time}")?,
            (None, None) => writeln!(f, "- Scheduled: unscheduled")?,
        }
        writeln!(f, "- Duration: {} minutes", self.duration_minutes)?;
        if let Some(lead) = self.reminder_lead_minutes {
            writeln!(f, "- Reminder: {lead} minutes before")?;
        }
        if self.auto_rescheduled {
            if self.conflict_adjusted {
                writeln!(f, "- Auto-rescheduled (shifted around another plan)")?;
            } else {
                writeln!(f, "- Auto-rescheduled")?;
            }
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        // Description as a paragraph
        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for DayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} plans, {} completed, {} missed, {} open ({:.2}% plans, {:.2}% minutes)",
            self.total,
            self.completed,
            self.missed,
            self.pending,
            self.completion_rate,
            self.minutes_completion_rate
        )
    }
}

impl fmt::Display for CalendarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days.is_empty() {
            return writeln!(f, "No dated plans found.");
        }

        writeln!(f, "# Calendar")?;
        writeln!(f)?;
        for (date, stats) in &self.days {
            writeln!(f, "- {date}: {stats}")?;
        }
        writeln!(f)?;
        writeln!(f, "Overall: {}", self.summary)
    }
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scanned {} plans: {} rescheduled, {} shifted around conflicts, {} errors",
            self.scanned, self.rescheduled, self.conflicts_resolved, self.errors
        )
    }
}

impl fmt::Display for SweepTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cycles. {}", self.cycles, self.stats)
    }
}
