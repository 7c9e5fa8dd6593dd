//! Health metrics: the four sub-health axes and the composite record.

use serde::{Deserialize, Serialize};

use crate::config::StatusThresholds;

/// Overall health bucket for an artifact, derived from the composite score
/// via non-overlapping half-open bins (inclusive lower bound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Critical,
    Decayed,
}

impl HealthStatus {
    /// Classify a composite score against the ordered thresholds.
    /// A score exactly at a boundary maps to the higher status.
    pub fn from_score(score: f64, thresholds: &StatusThresholds) -> Self {
        if score >= thresholds.degraded {
            HealthStatus::Healthy
        } else if score >= thresholds.critical {
            HealthStatus::Degraded
        } else if score >= thresholds.decayed {
            HealthStatus::Critical
        } else {
            HealthStatus::Decayed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Critical => "critical",
            HealthStatus::Decayed => "decayed",
        }
    }
}

/// Status of an artifact's dependency set (or a single dependency, when
/// used as an indexer hint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyStatus {
    Current,
    Outdated,
    Stale,
    Broken,
    Unknown,
}

impl DependencyStatus {
    /// Severity rank for worst-status aggregation: broken > stale >
    /// outdated > unknown > current.
    pub fn rank(&self) -> u8 {
        match self {
            DependencyStatus::Broken => 4,
            DependencyStatus::Stale => 3,
            DependencyStatus::Outdated => 2,
            DependencyStatus::Unknown => 1,
            DependencyStatus::Current => 0,
        }
    }
}

/// Per-scoring-call dependency assessment. Derived, never persisted alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyHealth {
    pub status: DependencyStatus,
    pub total: usize,
    pub current: usize,
    pub outdated: usize,
    pub stale: usize,
    pub broken: usize,
    pub unknown: usize,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl DependencyHealth {
    pub fn empty() -> Self {
        Self {
            status: DependencyStatus::Current,
            total: 0,
            current: 0,
            outdated: 0,
            stale: 0,
            broken: 0,
            unknown: 0,
            issues: Vec::new(),
        }
    }
}

/// Execution-environment compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentStatus {
    Compatible,
    Drifted,
    Incompatible,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentHealth {
    pub status: EnvironmentStatus,
    /// Runtime version the artifact declares (empty when undeclared).
    pub declared_runtime: String,
    /// Runtime version the host probe reports (empty when unprobeable).
    pub detected_runtime: String,
    pub runtime_mismatch: bool,
    #[serde(default)]
    pub missing_binaries: Vec<String>,
}

/// How relevant the artifact still is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelevanceStatus {
    Current,
    Aging,
    Stale,
    Superseded,
    Deprecated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceHealth {
    pub status: RelevanceStatus,
    pub days_since_creation: i64,
    pub days_since_update: i64,
    /// -1 when the artifact has never been verified.
    pub days_since_verification: i64,
    pub usage_count: u32,
    #[serde(default)]
    pub superseded_by: Vec<String>,
}

/// One recorded execution attempt (rolling window entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub at: i64,
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Execution history, sourced from the external execution collaborator.
/// `recent_runs` is a bounded rolling window of the most recent runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionHistory {
    pub total_attempts: u32,
    pub successful_runs: u32,
    pub failed_runs: u32,
    #[serde(default)]
    pub last_success: Option<i64>,
    #[serde(default)]
    pub last_failure: Option<i64>,
    #[serde(default)]
    pub last_error: String,
    #[serde(default)]
    pub recent_runs: Vec<RunRecord>,
}

impl ExecutionHistory {
    /// Window size for the rolling run history.
    pub const WINDOW: usize = 10;

    pub fn success_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        f64::from(self.successful_runs) / f64::from(self.total_attempts)
    }

    /// Append a run, trimming the window to the most recent entries.
    pub fn record_run(&mut self, run: RunRecord) {
        self.total_attempts += 1;
        if run.success {
            self.successful_runs += 1;
            self.last_success = Some(run.at);
        } else {
            self.failed_runs += 1;
            self.last_failure = Some(run.at);
            if let Some(ref err) = run.error {
                self.last_error = err.clone();
            }
        }
        self.recent_runs.push(run);
        if self.recent_runs.len() > Self::WINDOW {
            let excess = self.recent_runs.len() - Self::WINDOW;
            self.recent_runs.drain(..excess);
        }
    }
}

/// Complete health snapshot for one artifact. Created fresh on every
/// scoring pass — derived state, not accumulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub artifact_id: String,
    /// Composite score, always within [0, 100].
    pub health_score: f64,
    pub status: HealthStatus,
    pub dependency: DependencyHealth,
    pub environment: EnvironmentHealth,
    pub relevance: RelevanceHealth,
    pub execution: ExecutionHistory,
    pub checked_at: i64,
}
