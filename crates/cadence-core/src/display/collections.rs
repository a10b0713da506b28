//! Collection wrapper types for displaying groups of plans.

use std::{fmt, ops::Index};

use crate::models::Plan;

/// Newtype wrapper for displaying a list of plans.
///
/// Renders each plan as a compact one-line summary and handles empty
/// collections gracefully.
pub struct PlanList(pub Vec<Plan>);

impl PlanList {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of plans in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the plan at the given index.
    pub fn get(&self, index: usize) -> Option<&Plan> {
        self.0.get(index)
    }

    /// Get an iterator over the plans.
    pub fn iter(&self) -> std::slice::Iter<'_, Plan> {
        self.0.iter()
    }
}

impl Index<usize> for PlanList {
    type Output = Plan;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for PlanList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }

        for plan in &self.0 {
            let time = plan.scheduled_time.as_deref().unwrap_or("--:--");
            let date = plan.scheduled_date.as_deref().unwrap_or("undated");
            writeln!(
                f,
                "{}. [{}] {} ({}, {} at {}, {} min)",
                plan.id, plan.status, plan.title, plan.category, date, time, plan.duration_minutes
            )?;
        }
        Ok(())
    }
}
