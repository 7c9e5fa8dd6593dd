//! Health scoring: four sub-assessments combined by configured weights.

pub mod dependency;
pub mod environment;
pub mod execution;
pub mod relevance;
pub mod stdlib;

use std::sync::Arc;

use tend_core::config::HealthConfig;
use tend_core::traits::RuntimeProbe;
use tend_core::types::{Artifact, ExecutionHistory, HealthMetrics, HealthStatus};

/// Computes one `HealthMetrics` snapshot per artifact.
///
/// Stateless between calls: every invocation re-derives the full record
/// from the artifact, the supplied execution history, and the probe's host
/// facts. No side effects.
pub struct HealthScorer {
    config: HealthConfig,
    probe: Arc<dyn RuntimeProbe>,
}

impl HealthScorer {
    pub fn new(config: HealthConfig, probe: Arc<dyn RuntimeProbe>) -> Self {
        Self { config, probe }
    }

    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Score a single artifact at time `now`.
    pub fn score(
        &self,
        artifact: &Artifact,
        history: Option<&ExecutionHistory>,
        now: i64,
    ) -> HealthMetrics {
        let dependency = dependency::assess(artifact);
        let environment = environment::assess(artifact, self.probe.as_ref());
        let relevance = relevance::assess(artifact, &self.config.relevance, now);
        let execution = history.cloned().unwrap_or_default();

        let dep_score = dependency::score(&dependency);
        let env_score = environment::score(&environment, &self.config);
        let rel_score = relevance::score(&relevance);
        let exec_score = execution::score(&execution, &self.config, now);

        let weights = &self.config.weights;
        let composite = dep_score * weights.dependency
            + env_score * weights.environment
            + rel_score * weights.relevance
            + exec_score * weights.execution;
        let health_score = composite.clamp(0.0, 100.0);

        HealthMetrics {
            artifact_id: artifact.id.clone(),
            health_score,
            status: HealthStatus::from_score(health_score, &self.config.thresholds),
            dependency,
            environment,
            relevance,
            execution,
            checked_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tend_core::time::SECS_PER_DAY;
    use tend_core::traits::StaticProbe;
    use tend_core::types::ArtifactKind;

    fn fresh_artifact(now: i64) -> Artifact {
        Artifact {
            id: "nb-1".into(),
            title: "ETL Notebook".into(),
            path: "notebooks/etl.ipynb".into(),
            kind: ArtifactKind::Notebook,
            language: "python".into(),
            runtime: "3.12".into(),
            dependencies: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
            last_verified: Some(now),
            runnable_status: Default::default(),
            execution_count: 0,
            superseded_by: Vec::new(),
        }
    }

    /// Pristine artifact with no execution history.
    /// dep=100, env=100, rel=100, exec=75 → 98.75 → healthy.
    #[test]
    fn test_pristine_artifact_scores_98_75() {
        let now = 1_000 * SECS_PER_DAY;
        let probe = StaticProbe::new().with_runtime("python", "3.12.4");
        let scorer = HealthScorer::new(HealthConfig::default(), Arc::new(probe));

        let metrics = scorer.score(&fresh_artifact(now), None, now);
        assert!(
            (metrics.health_score - 98.75).abs() < 1e-9,
            "expected 98.75, got {}",
            metrics.health_score
        );
        assert_eq!(metrics.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_score_always_in_bounds() {
        let now = 1_000 * SECS_PER_DAY;
        let probe = StaticProbe::new().with_missing_binary("node");
        let scorer = HealthScorer::new(HealthConfig::default(), Arc::new(probe));

        let mut artifact = fresh_artifact(now);
        artifact.language = "javascript".into();
        artifact.runtime = "18".into();
        artifact.updated_at = Some(now - 5_000 * SECS_PER_DAY);
        artifact.last_verified = None;

        let metrics = scorer.score(&artifact, None, now);
        assert!((0.0..=100.0).contains(&metrics.health_score));
    }

    #[test]
    fn test_metrics_are_rederived_each_call() {
        let now = 1_000 * SECS_PER_DAY;
        let probe = StaticProbe::new().with_runtime("python", "3.12.4");
        let scorer = HealthScorer::new(HealthConfig::default(), Arc::new(probe));
        let artifact = fresh_artifact(now);

        let first = scorer.score(&artifact, None, now);
        let second = scorer.score(&artifact, None, now);
        assert_eq!(first, second, "scoring must be a pure re-derivation");
    }
}
