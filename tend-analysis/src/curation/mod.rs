//! Curation: one recommendation per artifact via the ordered rule table,
//! plus batch queries over the whole metrics map.

pub mod batch;
pub mod rules;

use rustc_hash::FxHashMap;

use tend_core::config::HealthConfig;
use tend_core::types::{
    ArtifactIndex, CurationRecommendation, DriftAlert, HealthMetrics,
};

use rules::{RuleContext, RULES};

/// Evaluates the rule table per artifact and answers batch queries.
pub struct CurationEngine {
    config: HealthConfig,
}

impl CurationEngine {
    pub fn new(config: HealthConfig) -> Self {
        Self { config }
    }

    /// One recommendation for one artifact, or none when nothing applies.
    /// Deterministic: same inputs always yield the same rule.
    pub fn recommend(
        &self,
        metrics: &HealthMetrics,
        alerts: &[DriftAlert],
    ) -> Option<CurationRecommendation> {
        let ctx = RuleContext { config: &self.config, metrics, alerts };
        RULES.iter().find_map(|rule| (rule.apply)(&ctx))
    }

    /// Recommendations for every artifact with one, sorted by priority then
    /// confidence descending.
    pub fn recommend_all(
        &self,
        metrics_by_id: &FxHashMap<String, HealthMetrics>,
        alerts: &[DriftAlert],
    ) -> Vec<CurationRecommendation> {
        let mut alerts_by_artifact: FxHashMap<&str, Vec<&DriftAlert>> = FxHashMap::default();
        for alert in alerts {
            alerts_by_artifact
                .entry(alert.artifact_id.as_str())
                .or_default()
                .push(alert);
        }

        let mut recommendations: Vec<CurationRecommendation> = metrics_by_id
            .values()
            .filter_map(|metrics| {
                let own: Vec<DriftAlert> = alerts_by_artifact
                    .get(metrics.artifact_id.as_str())
                    .map(|list| list.iter().map(|a| (*a).clone()).collect())
                    .unwrap_or_default();
                self.recommend(metrics, &own)
            })
            .collect();

        recommendations.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
        });
        recommendations
    }

    pub fn archive_candidates(
        &self,
        metrics_by_id: &FxHashMap<String, HealthMetrics>,
    ) -> Vec<CurationRecommendation> {
        batch::archive_candidates(&self.config, metrics_by_id)
    }

    pub fn merge_candidates(&self, index: &ArtifactIndex) -> Vec<(String, String, f64)> {
        batch::merge_candidates(&self.config, index)
    }

    pub fn refactor_targets(
        &self,
        metrics_by_id: &FxHashMap<String, HealthMetrics>,
    ) -> Vec<CurationRecommendation> {
        batch::refactor_targets(metrics_by_id)
    }

    pub fn gold_candidates(
        &self,
        metrics_by_id: &FxHashMap<String, HealthMetrics>,
    ) -> Vec<CurationRecommendation> {
        batch::gold_candidates(metrics_by_id)
    }
}
