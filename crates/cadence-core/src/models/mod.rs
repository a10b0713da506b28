//! Data models for plans and calendar aggregation.
//!
//! This module contains the core domain models of the Cadence scheduling
//! system. Display implementations live in [`crate::display`] to keep
//! data structures separate from presentation.

pub mod calendar;
pub mod filters;
pub mod plan;
pub mod requests;
pub mod status;

#[cfg(test)]
mod tests;

// Re-export all public types at the models level
pub use calendar::{CalendarReport, DayStats};
pub use filters::PlanFilter;
pub use plan::{NewPlan, Plan};
pub use requests::PlanPatch;
pub use status::{PlanCategory, PlanStatus};
