//! One-shot analysis pipeline: score everything in parallel, then detect
//! drift, then curate, then assemble the report.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::info;

use tend_core::config::HealthConfig;
use tend_core::traits::{HistoryProvider, RuntimeProbe};
use tend_core::types::{ArtifactIndex, HealthMetrics};

use crate::curation::CurationEngine;
use crate::drift::DriftDetector;
use crate::report::HealthReport;
use crate::scoring::HealthScorer;

/// Runs the full scoring, detection, and curation pass over an index.
///
/// Scoring is per-artifact and runs in parallel. The pairwise supersession
/// pass and curation need the complete metrics map, so they start only once
/// every artifact has been scored.
pub struct HealthPipeline {
    scorer: HealthScorer,
    detector: DriftDetector,
    curator: CurationEngine,
    repo_root: PathBuf,
}

impl HealthPipeline {
    pub fn new(
        config: HealthConfig,
        probe: Arc<dyn RuntimeProbe>,
        repo_root: impl Into<PathBuf>,
    ) -> Self {
        let repo_root = repo_root.into();
        Self {
            scorer: HealthScorer::new(config.clone(), probe),
            detector: DriftDetector::new(config.clone(), repo_root.clone()),
            curator: CurationEngine::new(config),
            repo_root,
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Score every artifact in the index.
    pub fn score_all(
        &self,
        index: &ArtifactIndex,
        histories: &dyn HistoryProvider,
        now: i64,
    ) -> FxHashMap<String, HealthMetrics> {
        index
            .artifacts
            .par_iter()
            .map(|artifact| {
                let history = histories.history(&artifact.id);
                let metrics = self.scorer.score(artifact, history.as_ref(), now);
                (artifact.id.clone(), metrics)
            })
            .collect()
    }

    /// Full pass producing the assembled report.
    pub fn run(
        &self,
        index: &ArtifactIndex,
        histories: &dyn HistoryProvider,
        previous_average: Option<f64>,
        now: i64,
    ) -> HealthReport {
        info!(artifacts = index.len(), "starting health analysis pass");

        let metrics = self.score_all(index, histories, now);
        let alerts = self.detector.detect_all(index, &metrics, now);
        let recommendations = self.curator.recommend_all(&metrics, &alerts);

        info!(
            alerts = alerts.len(),
            recommendations = recommendations.len(),
            "analysis pass complete"
        );

        let ordered: BTreeMap<String, HealthMetrics> = metrics.into_iter().collect();
        HealthReport::assemble(
            &self.repo_root.to_string_lossy(),
            ordered,
            alerts,
            recommendations,
            previous_average,
            now,
        )
    }
}
