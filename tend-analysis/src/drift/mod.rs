//! Drift detection: per-artifact checks, content signature scans, and the
//! cross-artifact supersession pass.

pub mod patterns;
pub mod similarity;

use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use tend_core::config::HealthConfig;
use tend_core::types::{
    Artifact, ArtifactIndex, ArtifactKind, CurationAction, DependencyStatus, DriftAlert,
    DriftKind, EnvironmentStatus, HealthMetrics, RelevanceStatus, RunnableStatus, Severity,
};

/// Section headings a runbook is expected to carry.
const REQUIRED_RUNBOOK_SECTIONS: &[&str] = &["## Scope", "## When to Use", "## Verification"];

/// Detects drift findings against scored artifacts. Pure analysis: reads
/// artifact content under `repo_root` but writes nothing.
pub struct DriftDetector {
    config: HealthConfig,
    repo_root: PathBuf,
}

impl DriftDetector {
    pub fn new(config: HealthConfig, repo_root: impl Into<PathBuf>) -> Self {
        Self { config, repo_root: repo_root.into() }
    }

    /// All per-artifact checks. Each check is independent; one artifact can
    /// raise several alerts.
    pub fn detect(&self, artifact: &Artifact, metrics: &HealthMetrics, now: i64) -> Vec<DriftAlert> {
        let mut alerts = Vec::new();

        if artifact.runnable_status == RunnableStatus::Broken {
            alerts.push(DriftAlert::new(
                &artifact.id,
                DriftKind::BrokenArtifact,
                Severity::Critical,
                "Artifact is marked as broken",
                CurationAction::Refactor,
                now,
            ));
        }

        match metrics.dependency.status {
            DependencyStatus::Broken => alerts.push(
                DriftAlert::new(
                    &artifact.id,
                    DriftKind::MissingDependency,
                    Severity::Critical,
                    format!("{} broken dependencies", metrics.dependency.broken),
                    CurationAction::Update,
                    now,
                )
                .with_detail("broken_count", metrics.dependency.broken.to_string()),
            ),
            DependencyStatus::Stale => alerts.push(
                DriftAlert::new(
                    &artifact.id,
                    DriftKind::MissingDependency,
                    Severity::Warning,
                    format!("{} stale dependencies", metrics.dependency.stale),
                    CurationAction::Update,
                    now,
                )
                .with_detail("stale_count", metrics.dependency.stale.to_string()),
            ),
            _ => {}
        }

        if metrics.environment.status == EnvironmentStatus::Incompatible {
            let mut alert = DriftAlert::new(
                &artifact.id,
                DriftKind::EnvironmentDrift,
                Severity::Critical,
                "Runtime environment is incompatible",
                CurationAction::Refactor,
                now,
            );
            if !metrics.environment.missing_binaries.is_empty() {
                alert = alert
                    .with_detail("missing_binaries", metrics.environment.missing_binaries.join(","));
            }
            alerts.push(alert);
        }

        match metrics.relevance.status {
            RelevanceStatus::Deprecated => alerts.push(DriftAlert::new(
                &artifact.id,
                DriftKind::ContentStaleness,
                Severity::Warning,
                format!(
                    "Content not updated in {} days",
                    metrics.relevance.days_since_update
                ),
                CurationAction::Archive,
                now,
            )),
            RelevanceStatus::Superseded => alerts.push(DriftAlert::new(
                &artifact.id,
                DriftKind::ContentStaleness,
                Severity::Warning,
                "Artifact has been superseded",
                CurationAction::Review,
                now,
            )),
            _ => {}
        }

        if metrics.execution.failed_runs >= self.config.auto_flag_broken_after_failures {
            alerts.push(
                DriftAlert::new(
                    &artifact.id,
                    DriftKind::BrokenArtifact,
                    Severity::Critical,
                    format!("{} failed execution attempts", metrics.execution.failed_runs),
                    CurationAction::Refactor,
                    now,
                )
                .with_detail("failed_runs", metrics.execution.failed_runs.to_string()),
            );
        }

        if let Some(content) = self.read_content(artifact) {
            alerts.extend(self.scan_deprecated_apis(artifact, &content, now));
            if artifact.kind == ArtifactKind::Runbook {
                alerts.extend(self.check_runbook_sections(artifact, &content, now));
            }
        }

        alerts
    }

    /// Scans external log text for execution-error signatures. Every match
    /// produces a critical broken-artifact alert.
    pub fn analyze_error_log(&self, artifact_id: &str, log: &str, now: i64) -> Vec<DriftAlert> {
        patterns::execution_errors()
            .matches(log)
            .into_iter()
            .map(|sig| {
                DriftAlert::new(
                    artifact_id,
                    DriftKind::BrokenArtifact,
                    Severity::Critical,
                    sig.message,
                    CurationAction::Refactor,
                    now,
                )
            })
            .collect()
    }

    /// Cross-artifact supersession pass. Requires the full metrics map, so
    /// it runs only after every artifact has been scored.
    ///
    /// Pairs of same-kind artifacts whose title overlap exceeds the supersede
    /// threshold yield one info alert against the older of the pair. Alerts
    /// are per qualifying pair, not deduplicated across overlapping pairs.
    pub fn detect_superseded(
        &self,
        index: &ArtifactIndex,
        metrics_by_id: &FxHashMap<String, HealthMetrics>,
        now: i64,
    ) -> Vec<DriftAlert> {
        let mut by_kind: FxHashMap<ArtifactKind, Vec<&Artifact>> = FxHashMap::default();
        for artifact in &index.artifacts {
            by_kind.entry(artifact.kind).or_default().push(artifact);
        }

        let score_of =
            |id: &str| metrics_by_id.get(id).map(|m| m.health_score);
        let threshold = self.config.similarity.supersede_threshold;

        let mut alerts = Vec::new();
        for group in by_kind.values() {
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    let (a, b) = (group[i], group[j]);
                    let overlap = similarity::title_similarity(a, b);
                    if overlap <= threshold {
                        continue;
                    }
                    let newer = similarity::newer_of(a, b, score_of);
                    let older = if newer.id == a.id { b } else { a };
                    alerts.push(
                        DriftAlert::new(
                            &older.id,
                            DriftKind::SupersededArtifact,
                            Severity::Info,
                            format!("Similar to newer artifact '{}'", newer.title),
                            CurationAction::Merge,
                            now,
                        )
                        .with_detail("similar_to", &newer.id)
                        .with_detail("similarity", format!("{overlap:.3}")),
                    );
                }
            }
        }
        alerts
    }

    /// Full detection pass: per-artifact checks in parallel, then the
    /// sequential pairwise pass over the complete metrics map.
    pub fn detect_all(
        &self,
        index: &ArtifactIndex,
        metrics_by_id: &FxHashMap<String, HealthMetrics>,
        now: i64,
    ) -> Vec<DriftAlert> {
        let mut alerts: Vec<DriftAlert> = index
            .artifacts
            .par_iter()
            .filter_map(|artifact| {
                metrics_by_id
                    .get(&artifact.id)
                    .map(|metrics| self.detect(artifact, metrics, now))
            })
            .flatten()
            .collect();

        alerts.extend(self.detect_superseded(index, metrics_by_id, now));
        alerts
    }

    fn read_content(&self, artifact: &Artifact) -> Option<String> {
        let path = self.repo_root.join(&artifact.path);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(err) => {
                debug!(path = %path.display(), %err, "content unreadable, skipping scans");
                None
            }
        }
    }

    fn scan_deprecated_apis(&self, artifact: &Artifact, content: &str, now: i64) -> Vec<DriftAlert> {
        patterns::deprecated_apis()
            .matches(content)
            .into_iter()
            .map(|sig| {
                DriftAlert::new(
                    &artifact.id,
                    DriftKind::DeprecatedApi,
                    Severity::Warning,
                    sig.message,
                    CurationAction::Update,
                    now,
                )
            })
            .collect()
    }

    fn check_runbook_sections(
        &self,
        artifact: &Artifact,
        content: &str,
        now: i64,
    ) -> Vec<DriftAlert> {
        let missing: Vec<&str> = REQUIRED_RUNBOOK_SECTIONS
            .iter()
            .filter(|section| !content.contains(**section))
            .copied()
            .collect();
        if missing.len() >= 2 {
            return vec![
                DriftAlert::new(
                    &artifact.id,
                    DriftKind::OutdatedRunbook,
                    Severity::Warning,
                    format!("Runbook is missing {} expected sections", missing.len()),
                    CurationAction::Update,
                    now,
                )
                .with_detail("missing_sections", missing.join(",")),
            ];
        }

        // A runbook that names its own last-updated date but has never been
        // verified may be describing a state nobody has confirmed since.
        if artifact.last_verified.is_none()
            && !patterns::last_updated_references().matches(content).is_empty()
        {
            return vec![DriftAlert::new(
                &artifact.id,
                DriftKind::OutdatedRunbook,
                Severity::Info,
                "Runbook may contain outdated information",
                CurationAction::Review,
                now,
            )];
        }

        Vec::new()
    }
}
