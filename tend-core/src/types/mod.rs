//! Domain types for the knowledge-health engine.
//! Closed sets are enums, never free-form strings, so rule tables stay
//! exhaustively checkable.

pub mod artifact;
pub mod curation;
pub mod drift;
pub mod health;
pub mod schedule;

pub use artifact::{
    Artifact, ArtifactIndex, ArtifactKind, DependencyRef, DependencySource, RunnableStatus,
};
pub use curation::{CurationAction, CurationRecommendation, Effort, Priority};
pub use drift::{DriftAlert, DriftKind, Severity};
pub use health::{
    DependencyHealth, DependencyStatus, EnvironmentHealth, EnvironmentStatus, ExecutionHistory,
    HealthMetrics, HealthStatus, RelevanceHealth, RelevanceStatus, RunRecord,
};
pub use schedule::RevalidationSchedule;
