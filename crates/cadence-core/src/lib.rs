//! Core library for the Cadence plan scheduling application.
//!
//! This crate provides the business logic for managing time-boxed plans:
//! storage backends, conflict detection over time-of-day windows, snooze
//! and reminder handling, a background reschedule sweep for overdue
//! plans, and calendar aggregation.
//!
//! # Quick Start
//!
//! ```rust
//! use cadence_core::{SchedulerBuilder, params::CreatePlan};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // A volatile scheduler; use with_database_path for persistence
//! let scheduler = SchedulerBuilder::new().in_memory().build().await?;
//!
//! let params = CreatePlan {
//!     title: "Morning review".to_string(),
//!     duration_minutes: Some(25),
//!     scheduled_time: Some("09:00".to_string()),
//!     ..Default::default()
//! };
//!
//! let plan = scheduler.create_plan("ada", &params).await?;
//! println!("Created plan: {}", plan);
//! # Ok(())
//! # }
//! ```
//!
//! # Conflict Model
//!
//! A scheduled plan occupies the half-open window
//! `[start, start + duration)` in minutes since midnight. Two plans of
//! the same user conflict when their windows overlap and neither is
//! completed or cancelled. Creates and updates are rejected on conflict;
//! snoozes are not, the [`sweep`] untangles whatever they land on.

pub mod conflict;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod scheduler;
pub mod store;
pub mod sweep;
pub mod timeofday;

// Re-export commonly used types
pub use display::{CreateResult, DeleteResult, LocalDateTime, PlanList, UpdateResult};
pub use error::{ConflictingPlan, Result, SchedulerError};
pub use models::{CalendarReport, DayStats, Plan, PlanCategory, PlanFilter, PlanStatus};
pub use params::{
    CalendarQuery, CreatePlan, Id, ListPlans, SetReminder, SnoozePlan, UpdatePlan,
};
pub use scheduler::{Scheduler, SchedulerBuilder};
pub use store::{MemoryStore, PlanStore, SqliteStore};
pub use sweep::{reschedule_loop, SweepConfig, SweepStats, SweepTotals};
