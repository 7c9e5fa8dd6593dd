//! Adaptive revalidation scheduling: frequency follows the health score,
//! due schedules are processed as a batch, and the schedule document is
//! persisted once per batch.

use std::path::PathBuf;
use std::time::Duration;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use tend_analysis::HealthScorer;
use tend_core::config::HealthConfig;
use tend_core::errors::StorageError;
use tend_core::traits::{HistoryProvider, ValidationOutcome};
use tend_core::types::{ArtifactIndex, HealthStatus, RevalidationSchedule};
use tend_storage::ScheduleStore;

use crate::validators::ValidatorRegistry;

/// Result of revalidating one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevalidationResult {
    pub artifact_id: String,
    pub success: bool,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub status: Option<HealthStatus>,
    pub dry_run: bool,
    #[serde(default)]
    pub validation: Option<ValidationOutcome>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Summary of one `run_all_due` batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub total_due: usize,
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub details: Vec<RevalidationResult>,
}

/// Schedules and runs periodic revalidation of artifacts.
pub struct RevalidationScheduler {
    config: HealthConfig,
    repo_root: PathBuf,
    scorer: HealthScorer,
    registry: ValidatorRegistry,
    store: ScheduleStore,
    schedules: FxHashMap<String, RevalidationSchedule>,
}

impl RevalidationScheduler {
    /// Build the scheduler, loading any persisted schedules.
    pub fn new(
        config: HealthConfig,
        repo_root: impl Into<PathBuf>,
        scorer: HealthScorer,
        registry: ValidatorRegistry,
        store: ScheduleStore,
    ) -> Result<Self, StorageError> {
        let schedules = store.load()?;
        Ok(Self {
            config,
            repo_root: repo_root.into(),
            scorer,
            registry,
            store,
            schedules,
        })
    }

    pub fn schedules(&self) -> &FxHashMap<String, RevalidationSchedule> {
        &self.schedules
    }

    /// Revalidation frequency for a health score: worse scores revalidate
    /// more often.
    fn frequency_for_score(&self, score: f64) -> u32 {
        if score < self.config.thresholds.critical {
            self.config.schedule.critical_frequency_days
        } else if score < self.config.thresholds.degraded {
            self.config.schedule.degraded_frequency_days
        } else {
            self.config.schedule.default_frequency_days
        }
    }

    /// Create (or replace) the schedule for an artifact based on its
    /// current score. The first run is due one full interval from `now`.
    pub fn initialize_schedule(
        &mut self,
        artifact_id: &str,
        health_score: f64,
        now: i64,
    ) -> &RevalidationSchedule {
        let frequency = self.frequency_for_score(health_score);
        let schedule = RevalidationSchedule::new(artifact_id, frequency, now);
        self.schedules.insert(artifact_id.to_string(), schedule);
        &self.schedules[artifact_id]
    }

    /// Ids of active schedules due at `now`, in stable id order.
    pub fn get_due_artifacts(&self, now: i64) -> Vec<String> {
        let mut due: Vec<String> = self
            .schedules
            .values()
            .filter(|s| s.is_due(now))
            .map(|s| s.artifact_id.clone())
            .collect();
        due.sort();
        due
    }

    /// Revalidate one artifact: re-score, optionally run the registered
    /// validator, and reschedule from the fresh score.
    ///
    /// The schedule is updated even when validation fails; only a missing
    /// artifact leaves it untouched.
    pub fn run_revalidation(
        &mut self,
        artifact_id: &str,
        index: &ArtifactIndex,
        histories: &dyn HistoryProvider,
        dry_run: bool,
        timeout: Duration,
        now: i64,
    ) -> RevalidationResult {
        let Some(artifact) = index.get(artifact_id) else {
            return RevalidationResult {
                artifact_id: artifact_id.to_string(),
                success: false,
                health_score: None,
                status: None,
                dry_run,
                validation: None,
                error: Some(format!("artifact {artifact_id} not found in index")),
            };
        };

        let history = histories.history(artifact_id);
        let metrics = self.scorer.score(artifact, history.as_ref(), now);

        let validation = if dry_run {
            None
        } else {
            Some(self.registry.validate(artifact, &self.repo_root, timeout))
        };
        let validation_failed = validation.as_ref().is_some_and(|v| !v.success);

        let frequency = self.frequency_for_score(metrics.health_score);
        self.schedules
            .entry(artifact_id.to_string())
            .or_insert_with(|| RevalidationSchedule::new(artifact_id, frequency, now))
            .mark_run(now, frequency, validation_failed);

        RevalidationResult {
            artifact_id: artifact_id.to_string(),
            success: true,
            health_score: Some(metrics.health_score),
            status: Some(metrics.status),
            dry_run,
            validation,
            error: None,
        }
    }

    /// Process every due artifact, then persist the schedule map once.
    ///
    /// One artifact's fault never aborts the batch, and a persistence
    /// failure is logged rather than raised so the in-memory results
    /// survive.
    pub fn run_all_due(
        &mut self,
        index: &ArtifactIndex,
        histories: &dyn HistoryProvider,
        dry_run: bool,
        timeout: Duration,
        now: i64,
    ) -> BatchResult {
        let due = self.get_due_artifacts(now);
        info!(due = due.len(), dry_run, "starting revalidation batch");

        let mut result = BatchResult {
            total_due: due.len(),
            processed: 0,
            successful: 0,
            failed: 0,
            details: Vec::with_capacity(due.len()),
        };

        for artifact_id in &due {
            let outcome =
                self.run_revalidation(artifact_id, index, histories, dry_run, timeout, now);
            result.processed += 1;
            if outcome.success {
                result.successful += 1;
            } else {
                result.failed += 1;
            }
            result.details.push(outcome);
        }

        if let Err(e) = self.store.save(&self.schedules) {
            error!(%e, "failed to persist schedules, in-memory state retained");
        }

        result
    }
}
