//! Display formatting functions and result types.
//!
//! Domain models carry their own `Display` implementations; this module
//! adds newtype wrappers for collections and operation results so every
//! output context (terminal, logs) formats the same way.
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (PlanList)
//! - [`results`]: Operation result types (CreateResult, UpdateResult, DeleteResult)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::PlanList;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
