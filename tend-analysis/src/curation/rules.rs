//! The ordered curation rule table. First matching rule wins; the order of
//! `RULES` is the decision order.

use tend_core::config::HealthConfig;
use tend_core::types::{
    CurationAction, CurationRecommendation, DependencyStatus, DriftAlert, DriftKind, Effort,
    EnvironmentStatus, HealthMetrics, HealthStatus, Priority, RelevanceStatus,
};

/// Inputs one rule evaluation sees.
pub struct RuleContext<'a> {
    pub config: &'a HealthConfig,
    pub metrics: &'a HealthMetrics,
    pub alerts: &'a [DriftAlert],
}

/// One named rule. Named so tests can enumerate the table and assert the
/// decision order.
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&RuleContext<'_>) -> Option<CurationRecommendation>,
}

/// The decision order. Evaluated top to bottom, first match wins.
pub const RULES: &[Rule] = &[
    Rule { name: "decayed_archive", apply: decayed_archive },
    Rule { name: "critical_triage", apply: critical_triage },
    Rule { name: "superseded_merge", apply: superseded_merge },
    Rule { name: "deprecated_archive", apply: deprecated_archive },
    Rule { name: "stale_update", apply: stale_update },
    Rule { name: "gold_promotion", apply: gold_promotion },
    Rule { name: "degraded_update", apply: degraded_update },
];

fn recommendation(
    ctx: &RuleContext<'_>,
    action: CurationAction,
    priority: Priority,
    reason: String,
    confidence: f64,
    effort: Effort,
) -> CurationRecommendation {
    CurationRecommendation {
        artifact_id: ctx.metrics.artifact_id.clone(),
        action,
        priority,
        reason,
        confidence,
        related_artifacts: Vec::new(),
        effort,
    }
}

fn decayed_archive(ctx: &RuleContext<'_>) -> Option<CurationRecommendation> {
    if ctx.metrics.status != HealthStatus::Decayed {
        return None;
    }
    Some(recommendation(
        ctx,
        CurationAction::Archive,
        Priority::High,
        "Artifact has decayed. Multiple critical issues.".to_string(),
        0.9,
        Effort::Small,
    ))
}

fn critical_triage(ctx: &RuleContext<'_>) -> Option<CurationRecommendation> {
    if ctx.metrics.status != HealthStatus::Critical {
        return None;
    }
    if ctx.metrics.dependency.status == DependencyStatus::Broken {
        let issues = ctx.metrics.dependency.issues.iter().take(2).cloned()
            .collect::<Vec<_>>()
            .join(", ");
        return Some(recommendation(
            ctx,
            CurationAction::Refactor,
            Priority::High,
            format!("Critical dependency failures: {issues}"),
            0.85,
            Effort::Large,
        ));
    }
    if ctx.metrics.environment.status == EnvironmentStatus::Incompatible {
        return Some(recommendation(
            ctx,
            CurationAction::Refactor,
            Priority::High,
            "Environment incompatibility. Requires significant updates.".to_string(),
            0.85,
            Effort::Large,
        ));
    }
    if ctx.metrics.execution.failed_runs >= ctx.config.auto_flag_broken_after_failures {
        return Some(recommendation(
            ctx,
            CurationAction::Refactor,
            Priority::High,
            format!(
                "Multiple execution failures ({}). Needs debugging.",
                ctx.metrics.execution.failed_runs
            ),
            0.8,
            Effort::Medium,
        ));
    }
    Some(recommendation(
        ctx,
        CurationAction::Review,
        Priority::High,
        "Artifact in critical health state. Manual review required.".to_string(),
        0.7,
        Effort::Medium,
    ))
}

fn superseded_merge(ctx: &RuleContext<'_>) -> Option<CurationRecommendation> {
    let alert = ctx
        .alerts
        .iter()
        .find(|a| a.kind == DriftKind::SupersededArtifact)?;
    let similar_to = alert.similar_to().unwrap_or_default().to_string();
    let mut rec = recommendation(
        ctx,
        CurationAction::Merge,
        Priority::Medium,
        format!("Highly similar to {similar_to}. Consider merging."),
        alert.similarity().unwrap_or(0.7),
        Effort::Medium,
    );
    if !similar_to.is_empty() {
        rec.related_artifacts.push(similar_to);
    }
    Some(rec)
}

fn deprecated_archive(ctx: &RuleContext<'_>) -> Option<CurationRecommendation> {
    if ctx.metrics.relevance.status != RelevanceStatus::Deprecated {
        return None;
    }
    Some(recommendation(
        ctx,
        CurationAction::Archive,
        Priority::Medium,
        format!(
            "Content deprecated. Last updated {} days ago.",
            ctx.metrics.relevance.days_since_update
        ),
        0.85,
        Effort::Small,
    ))
}

fn stale_update(ctx: &RuleContext<'_>) -> Option<CurationRecommendation> {
    if ctx.metrics.relevance.status != RelevanceStatus::Stale {
        return None;
    }
    if let Some(api_alert) = ctx.alerts.iter().find(|a| a.kind == DriftKind::DeprecatedApi) {
        return Some(recommendation(
            ctx,
            CurationAction::Update,
            Priority::Medium,
            format!("Stale content with deprecated APIs. {}", api_alert.message),
            0.75,
            Effort::Medium,
        ));
    }
    Some(recommendation(
        ctx,
        CurationAction::Update,
        Priority::Low,
        format!(
            "Content stale ({} days). Refresh recommended.",
            ctx.metrics.relevance.days_since_update
        ),
        0.6,
        Effort::Small,
    ))
}

fn gold_promotion(ctx: &RuleContext<'_>) -> Option<CurationRecommendation> {
    if !is_gold_standard(ctx.metrics) {
        return None;
    }
    Some(recommendation(
        ctx,
        CurationAction::PromoteGold,
        Priority::Low,
        "High-quality artifact with good usage. Candidate for gold standard.".to_string(),
        0.7,
        Effort::Small,
    ))
}

fn degraded_update(ctx: &RuleContext<'_>) -> Option<CurationRecommendation> {
    if ctx.metrics.status != HealthStatus::Degraded {
        return None;
    }
    if ctx.metrics.dependency.status == DependencyStatus::Stale {
        return Some(recommendation(
            ctx,
            CurationAction::Update,
            Priority::Medium,
            "Dependencies outdated. Update recommended.".to_string(),
            0.65,
            Effort::Small,
        ));
    }
    if ctx.metrics.relevance.status == RelevanceStatus::Aging {
        return Some(recommendation(
            ctx,
            CurationAction::Update,
            Priority::Low,
            "Content aging. Minor refresh suggested.".to_string(),
            0.5,
            Effort::Small,
        ));
    }
    Some(recommendation(
        ctx,
        CurationAction::Review,
        Priority::Low,
        "Artifact health degraded. Review recommended.".to_string(),
        0.5,
        Effort::Small,
    ))
}

/// Gold-standard bar: healthy, score at least 90, current dependencies,
/// updated within 180 days, at least 3 successful runs, and a success rate
/// of 0.9 when any attempts exist.
pub fn is_gold_standard(metrics: &HealthMetrics) -> bool {
    if metrics.status != HealthStatus::Healthy {
        return false;
    }
    if metrics.health_score < 90.0 {
        return false;
    }
    if metrics.execution.successful_runs < 3 {
        return false;
    }
    if metrics.dependency.status != DependencyStatus::Current {
        return false;
    }
    if metrics.relevance.days_since_update > 180 {
        return false;
    }
    if metrics.execution.total_attempts > 0 && metrics.execution.success_rate() < 0.9 {
        return false;
    }
    true
}
