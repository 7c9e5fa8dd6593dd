//! The assembled health report: summary counts, alerts, recommendations,
//! and a markdown rendering with bounded tables.

pub mod pipeline;

pub use pipeline::HealthPipeline;

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};

use tend_core::types::{
    CurationRecommendation, DependencyStatus, DriftAlert, EnvironmentStatus, HealthMetrics,
    HealthStatus, RelevanceStatus,
};

/// Health-score direction against a previous report's average. Within the
/// band counts as stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    /// Two-point band: a move of more than 2.0 in either direction counts.
    pub fn from_averages(current: f64, previous: Option<f64>) -> Self {
        match previous {
            Some(prev) if current > prev + 2.0 => Trend::Improving,
            Some(prev) if current < prev - 2.0 => Trend::Declining,
            _ => Trend::Stable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

/// Complete snapshot of one analysis pass over the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub generated_at: i64,
    pub repo_root: String,
    pub total_artifacts: usize,
    pub healthy_count: usize,
    pub degraded_count: usize,
    pub critical_count: usize,
    pub decayed_count: usize,
    pub artifacts_with_drift: usize,
    pub artifacts_needing_curation: usize,
    /// BTreeMap keeps the serialized artifact order stable.
    pub health_metrics: BTreeMap<String, HealthMetrics>,
    pub active_alerts: Vec<DriftAlert>,
    pub curation_recommendations: Vec<CurationRecommendation>,
    pub average_health_score: f64,
    pub health_score_trend: Trend,
}

impl HealthReport {
    /// Assemble the report from one pass's outputs.
    pub fn assemble(
        repo_root: &str,
        metrics: BTreeMap<String, HealthMetrics>,
        alerts: Vec<DriftAlert>,
        recommendations: Vec<CurationRecommendation>,
        previous_average: Option<f64>,
        now: i64,
    ) -> Self {
        let total = metrics.len();
        let count_status = |status: HealthStatus| {
            metrics.values().filter(|m| m.status == status).count()
        };
        let average = if total == 0 {
            0.0
        } else {
            metrics.values().map(|m| m.health_score).sum::<f64>() / total as f64
        };
        let drifted: rustc_hash::FxHashSet<&str> =
            alerts.iter().map(|a| a.artifact_id.as_str()).collect();

        Self {
            generated_at: now,
            repo_root: repo_root.to_string(),
            total_artifacts: total,
            healthy_count: count_status(HealthStatus::Healthy),
            degraded_count: count_status(HealthStatus::Degraded),
            critical_count: count_status(HealthStatus::Critical),
            decayed_count: count_status(HealthStatus::Decayed),
            artifacts_with_drift: drifted.len(),
            artifacts_needing_curation: recommendations.len(),
            health_metrics: metrics,
            active_alerts: alerts,
            curation_recommendations: recommendations,
            average_health_score: average,
            health_score_trend: Trend::from_averages(average, previous_average),
        }
    }

    /// Markdown rendering. Tables are bounded: top 20 alerts, top 20
    /// recommendations, up to 15 critical artifacts.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let total = self.total_artifacts.max(1) as f64;
        let pct = |count: usize| count as f64 / total * 100.0;

        let _ = writeln!(md, "# Knowledge Health Report\n");
        let _ = writeln!(md, "**Repository**: {}\n", self.repo_root);
        let _ = writeln!(md, "## Summary\n");
        let _ = writeln!(md, "- **Total Artifacts**: {}", self.total_artifacts);
        let _ = writeln!(
            md,
            "- **Average Health Score**: {:.1}/100",
            self.average_health_score
        );
        let _ = writeln!(md, "- **Health Trend**: {}\n", self.health_score_trend.as_str());
        let _ = writeln!(md, "### Health Distribution\n");
        let _ = writeln!(md, "| Status | Count | Percentage |");
        let _ = writeln!(md, "|--------|-------|------------|");
        let _ = writeln!(md, "| Healthy | {} | {:.1}% |", self.healthy_count, pct(self.healthy_count));
        let _ = writeln!(md, "| Degraded | {} | {:.1}% |", self.degraded_count, pct(self.degraded_count));
        let _ = writeln!(md, "| Critical | {} | {:.1}% |", self.critical_count, pct(self.critical_count));
        let _ = writeln!(md, "| Decayed | {} | {:.1}% |", self.decayed_count, pct(self.decayed_count));

        let _ = writeln!(md, "\n## Active Alerts\n");
        if self.active_alerts.is_empty() {
            let _ = writeln!(md, "No active drift alerts detected.");
        } else {
            let _ = writeln!(md, "| Artifact | Type | Severity | Message |");
            let _ = writeln!(md, "|----------|------|----------|---------|");
            for alert in self.active_alerts.iter().take(20) {
                let _ = writeln!(
                    md,
                    "| {} | {:?} | {} | {} |",
                    truncate(&alert.artifact_id, 40),
                    alert.kind,
                    alert.severity.as_str(),
                    truncate(&alert.message, 50),
                );
            }
        }

        let _ = writeln!(md, "\n## Curation Recommendations\n");
        if self.curation_recommendations.is_empty() {
            let _ = writeln!(md, "No curation recommendations at this time.");
        } else {
            let _ = writeln!(md, "| Artifact | Action | Priority | Confidence | Reason |");
            let _ = writeln!(md, "|----------|--------|----------|------------|--------|");
            for rec in self.curation_recommendations.iter().take(20) {
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {:.0}% | {} |",
                    truncate(&rec.artifact_id, 40),
                    rec.action.as_str(),
                    rec.priority.as_str(),
                    rec.confidence * 100.0,
                    truncate(&rec.reason, 50),
                );
            }
        }

        let _ = writeln!(md, "\n## Critical Artifacts (Score < 50)\n");
        let mut critical: Vec<&HealthMetrics> = self
            .health_metrics
            .values()
            .filter(|m| m.health_score < 50.0)
            .collect();
        if critical.is_empty() {
            let _ = writeln!(md, "No critical artifacts detected.");
        } else {
            critical.sort_by(|a, b| a.health_score.total_cmp(&b.health_score));
            let _ = writeln!(md, "| Artifact | Score | Status | Primary Issue |");
            let _ = writeln!(md, "|----------|-------|--------|---------------|");
            for metrics in critical.iter().take(15) {
                let _ = writeln!(
                    md,
                    "| {} | {:.0} | {} | {} |",
                    truncate(&metrics.artifact_id, 40),
                    metrics.health_score,
                    metrics.status.as_str(),
                    primary_issue(metrics),
                );
            }
        }

        md.push('\n');
        md
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}

fn primary_issue(metrics: &HealthMetrics) -> String {
    match metrics.dependency.status {
        DependencyStatus::Broken => return "Deps: broken".to_string(),
        DependencyStatus::Stale => return "Deps: stale".to_string(),
        _ => {}
    }
    if metrics.environment.status == EnvironmentStatus::Incompatible {
        return "Environment incompatible".to_string();
    }
    match metrics.relevance.status {
        RelevanceStatus::Superseded => return "Relevance: superseded".to_string(),
        RelevanceStatus::Deprecated => return "Relevance: deprecated".to_string(),
        _ => {}
    }
    if metrics.execution.failed_runs > metrics.execution.successful_runs {
        return "Execution failures".to_string();
    }
    "Unknown".to_string()
}
