//! Analysis engine for Tend: scoring, drift detection, curation, reporting.
//!
//! Per-artifact scoring and detection are pure functions of that artifact's
//! own data plus a read-only index snapshot, so the per-artifact phase runs
//! on a worker pool with no ordering requirements. The cross-artifact
//! similarity pass runs after every artifact's metrics exist.

pub mod curation;
pub mod drift;
pub mod report;
pub mod scoring;

pub use curation::CurationEngine;
pub use drift::DriftDetector;
pub use report::{HealthPipeline, HealthReport};
pub use scoring::HealthScorer;
