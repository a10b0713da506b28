//! Filter types for querying plans.

use super::{Plan, PlanCategory, PlanStatus};

/// Filter options for listing a user's plans.
///
/// Filters compose with AND semantics; an empty filter matches
/// everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanFilter {
    /// Keep only plans in this category
    pub category: Option<PlanCategory>,

    /// Keep only plans with this status
    pub status: Option<PlanStatus>,
}

impl PlanFilter {
    /// Whether a plan passes this filter.
    pub fn matches(&self, plan: &Plan) -> bool {
        if let Some(category) = self.category {
            if plan.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if plan.status != status {
                return false;
            }
        }
        true
    }
}

impl From<&crate::params::ListPlans> for PlanFilter {
    fn from(params: &crate::params::ListPlans) -> Self {
        Self {
            category: params.category,
            status: params.status,
        }
    }
}
