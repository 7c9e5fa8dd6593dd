//! Batch curation queries, independent of the per-artifact rule table.

use rustc_hash::{FxHashMap, FxHashSet};

use tend_core::config::HealthConfig;
use tend_core::types::{
    ArtifactIndex, ArtifactKind, CurationAction, CurationRecommendation, DependencyStatus,
    Effort, EnvironmentStatus, HealthMetrics, HealthStatus, Priority, RelevanceStatus,
};

use crate::drift::similarity;

use super::rules::is_gold_standard;

/// Artifacts that should be moved out of the active set.
pub fn archive_candidates(
    config: &HealthConfig,
    metrics_by_id: &FxHashMap<String, HealthMetrics>,
) -> Vec<CurationRecommendation> {
    let mut candidates = Vec::new();
    for (artifact_id, metrics) in metrics_by_id {
        let (reason, confidence) = if metrics.relevance.days_since_update
            > config.auto_archive_threshold_days
            && metrics.relevance.usage_count == 0
        {
            (
                format!(
                    "Unused artifact older than {} days",
                    config.auto_archive_threshold_days
                ),
                0.9,
            )
        } else if metrics.relevance.status == RelevanceStatus::Deprecated {
            ("Content marked as deprecated".to_string(), 0.95)
        } else if metrics.status == HealthStatus::Decayed && metrics.execution.failed_runs > 5 {
            ("Decayed artifact with repeated failures".to_string(), 0.85)
        } else {
            continue;
        };
        candidates.push(CurationRecommendation {
            artifact_id: artifact_id.clone(),
            action: CurationAction::Archive,
            priority: Priority::Medium,
            reason,
            confidence,
            related_artifacts: Vec::new(),
            effort: Effort::Small,
        });
    }
    candidates
}

/// Same-kind artifact pairs whose titles overlap above the merge threshold.
/// Deduplicated by unordered pair, sorted by similarity descending, top 20.
pub fn merge_candidates(
    config: &HealthConfig,
    index: &ArtifactIndex,
) -> Vec<(String, String, f64)> {
    let mut by_kind: FxHashMap<ArtifactKind, Vec<usize>> = FxHashMap::default();
    for (idx, artifact) in index.artifacts.iter().enumerate() {
        by_kind.entry(artifact.kind).or_default().push(idx);
    }

    let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
    let mut candidates = Vec::new();
    for group in by_kind.values() {
        for i in 0..group.len() {
            for j in (i + 1)..group.len() {
                let a = &index.artifacts[group[i]];
                let b = &index.artifacts[group[j]];
                let key = if a.id <= b.id {
                    (a.id.clone(), b.id.clone())
                } else {
                    (b.id.clone(), a.id.clone())
                };
                if !seen.insert(key) {
                    continue;
                }
                let overlap = similarity::title_similarity(a, b);
                if overlap > config.similarity.merge_threshold {
                    candidates.push((a.id.clone(), b.id.clone(), overlap));
                }
            }
        }
    }

    candidates.sort_by(|x, y| y.2.total_cmp(&x.2));
    candidates.truncate(20);
    candidates
}

/// Critical or decayed artifacts with a structural fault worth a rewrite.
pub fn refactor_targets(
    metrics_by_id: &FxHashMap<String, HealthMetrics>,
) -> Vec<CurationRecommendation> {
    let mut targets = Vec::new();
    for (artifact_id, metrics) in metrics_by_id {
        if !matches!(metrics.status, HealthStatus::Critical | HealthStatus::Decayed) {
            continue;
        }
        let (priority, reason, confidence, effort) =
            if metrics.environment.status == EnvironmentStatus::Incompatible {
                (
                    Priority::High,
                    "Environment incompatibility requires major refactoring".to_string(),
                    0.85,
                    Effort::Large,
                )
            } else if metrics.dependency.status == DependencyStatus::Broken {
                (
                    Priority::High,
                    "Broken dependencies require refactoring".to_string(),
                    0.8,
                    Effort::Large,
                )
            } else if metrics.execution.failed_runs >= 5 {
                (
                    Priority::Medium,
                    format!(
                        "Persistent execution failures ({})",
                        metrics.execution.failed_runs
                    ),
                    0.75,
                    Effort::Medium,
                )
            } else {
                continue;
            };
        targets.push(CurationRecommendation {
            artifact_id: artifact_id.clone(),
            action: CurationAction::Refactor,
            priority,
            reason,
            confidence,
            related_artifacts: Vec::new(),
            effort,
        });
    }
    targets
}

/// Artifacts meeting the gold-standard bar, best score first, top 10.
pub fn gold_candidates(
    metrics_by_id: &FxHashMap<String, HealthMetrics>,
) -> Vec<CurationRecommendation> {
    let mut candidates: Vec<(f64, CurationRecommendation)> = metrics_by_id
        .iter()
        .filter(|(_, m)| is_gold_standard(m))
        .map(|(artifact_id, metrics)| {
            (
                metrics.health_score,
                CurationRecommendation {
                    artifact_id: artifact_id.clone(),
                    action: CurationAction::PromoteGold,
                    priority: Priority::Low,
                    reason: "High-quality, well-used artifact with excellent health metrics"
                        .to_string(),
                    confidence: 0.75,
                    related_artifacts: Vec::new(),
                    effort: Effort::Small,
                },
            )
        })
        .collect();

    candidates.sort_by(|x, y| y.0.total_cmp(&x.0));
    candidates.truncate(10);
    candidates.into_iter().map(|(_, rec)| rec).collect()
}
