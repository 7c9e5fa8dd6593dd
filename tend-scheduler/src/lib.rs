//! Revalidation scheduling for Tend.
//!
//! Frequency adapts to health: artifacts scoring below the critical
//! threshold revalidate daily, degraded ones every three days, healthy
//! ones weekly. One batch processes all due artifacts and persists the
//! schedule document exactly once at the end.

pub mod scheduler;
pub mod validators;

pub use scheduler::{BatchResult, RevalidationResult, RevalidationScheduler};
pub use validators::{
    NotebookValidator, RunbookValidator, ScriptValidator, TemplateValidator, ValidatorRegistry,
};
