//! Process-wide configuration for scoring, drift, curation, and scheduling.
//!
//! An explicit immutable value handed to each component constructor —
//! never read from ambient state — so behavior is reproducible across
//! calls and testable with alternate configurations.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`TEND_*`)
//! 2. Project config (`tend.toml` in the repo root)
//! 3. Compiled defaults

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Weights combining the four sub-scores. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub dependency: f64,
    pub environment: f64,
    pub relevance: f64,
    pub execution: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            dependency: 0.30,
            environment: 0.20,
            relevance: 0.25,
            execution: 0.25,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.dependency + self.environment + self.relevance + self.execution
    }
}

/// Score thresholds mapping a composite score to a status bucket.
/// Strictly ordered: decayed < critical < degraded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Scores ≥ this are healthy.
    pub degraded: f64,
    /// Scores ≥ this (and < degraded) are degraded.
    pub critical: f64,
    /// Scores ≥ this (and < critical) are critical; below is decayed.
    pub decayed: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self { degraded: 80.0, critical: 50.0, decayed: 20.0 }
    }
}

/// Age thresholds (days since update) deriving relevance status.
/// Strictly increasing: aging < stale < deprecated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceThresholds {
    pub aging_days: i64,
    pub stale_days: i64,
    pub deprecated_days: i64,
}

impl Default for RelevanceThresholds {
    fn default() -> Self {
        Self { aging_days: 90, stale_days: 180, deprecated_days: 365 }
    }
}

/// Revalidation frequencies by health tier, in days. Each ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub default_frequency_days: u32,
    pub degraded_frequency_days: u32,
    pub critical_frequency_days: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            default_frequency_days: 7,
            degraded_frequency_days: 3,
            critical_frequency_days: 1,
        }
    }
}

/// Title-similarity thresholds for cross-artifact analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Overlap above which a superseded-artifact alert fires.
    pub supersede_threshold: f64,
    /// Overlap above which a pair becomes a merge candidate.
    pub merge_threshold: f64,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self { supersede_threshold: 0.7, merge_threshold: 0.6 }
    }
}

/// Top-level configuration for the knowledge-health engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub weights: ScoreWeights,
    pub thresholds: StatusThresholds,
    pub relevance: RelevanceThresholds,
    pub schedule: ScheduleConfig,
    pub similarity: SimilarityConfig,
    pub auto_flag_broken_after_failures: u32,
    pub auto_archive_threshold_days: i64,
    /// Calibration constant: execution score with zero recorded attempts.
    pub neutral_execution_score: f64,
    /// Calibration constant: environment score when status is unknown.
    pub unknown_environment_score: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            thresholds: StatusThresholds::default(),
            relevance: RelevanceThresholds::default(),
            schedule: ScheduleConfig::default(),
            similarity: SimilarityConfig::default(),
            auto_flag_broken_after_failures: 3,
            auto_archive_threshold_days: 730,
            neutral_execution_score: 75.0,
            unknown_environment_score: 75.0,
        }
    }
}

impl HealthConfig {
    /// Load configuration: compiled defaults, then `tend.toml` in `root`,
    /// then `TEND_*` environment overrides, then validate.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_path = root.join("tend.toml");
        if project_path.exists() {
            let content = std::fs::read_to_string(&project_path).map_err(|_| {
                ConfigError::FileNotFound { path: project_path.display().to_string() }
            })?;
            config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: project_path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Parse from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    /// Pattern: `TEND_DEGRADED_THRESHOLD`, `TEND_AUTO_FLAG_FAILURES`, etc.
    fn apply_env_overrides(config: &mut HealthConfig) {
        if let Ok(val) = std::env::var("TEND_DEGRADED_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.degraded = v;
            }
        }
        if let Ok(val) = std::env::var("TEND_CRITICAL_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.critical = v;
            }
        }
        if let Ok(val) = std::env::var("TEND_DECAYED_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.decayed = v;
            }
        }
        if let Ok(val) = std::env::var("TEND_AUTO_FLAG_FAILURES") {
            if let Ok(v) = val.parse::<u32>() {
                config.auto_flag_broken_after_failures = v;
            }
        }
        if let Ok(val) = std::env::var("TEND_DEFAULT_FREQUENCY_DAYS") {
            if let Ok(v) = val.parse::<u32>() {
                config.schedule.default_frequency_days = v;
            }
        }
    }

    /// Validate invariants: weight sum, threshold ordering, frequencies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (self.weights.sum() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::ValidationFailed {
                field: "weights".to_string(),
                message: format!("must sum to 1.0, got {}", self.weights.sum()),
            });
        }
        let t = &self.thresholds;
        if !(t.decayed < t.critical && t.critical < t.degraded) {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds".to_string(),
                message: "must be strictly ordered: decayed < critical < degraded".to_string(),
            });
        }
        if !(0.0..=100.0).contains(&t.decayed) || !(0.0..=100.0).contains(&t.degraded) {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds".to_string(),
                message: "must lie within [0, 100]".to_string(),
            });
        }
        let r = &self.relevance;
        if !(r.aging_days < r.stale_days && r.stale_days < r.deprecated_days) {
            return Err(ConfigError::ValidationFailed {
                field: "relevance".to_string(),
                message: "must be strictly increasing: aging < stale < deprecated".to_string(),
            });
        }
        let s = &self.schedule;
        if s.default_frequency_days == 0
            || s.degraded_frequency_days == 0
            || s.critical_frequency_days == 0
        {
            return Err(ConfigError::ValidationFailed {
                field: "schedule".to_string(),
                message: "frequencies must be at least 1 day".to_string(),
            });
        }
        for (field, value) in [
            ("similarity.supersede_threshold", self.similarity.supersede_threshold),
            ("similarity.merge_threshold", self.similarity.merge_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        Ok(())
    }
}
