//! Relevance sub-health: age-driven decay with usage correction.

use tend_core::config::RelevanceThresholds;
use tend_core::time::days_between;
use tend_core::types::{Artifact, RelevanceHealth, RelevanceStatus};

/// Assess relevance at time `now`.
///
/// Supersession references from the index override the age ladder; absent
/// those, days-since-update walks the aging → stale → deprecated
/// thresholds. An artifact with no recorded update falls back to its
/// creation time, and with neither counts as freshly current.
pub fn assess(artifact: &Artifact, thresholds: &RelevanceThresholds, now: i64) -> RelevanceHealth {
    let created = artifact.created_at;
    let updated = artifact.updated_at.or(created);

    let days_since_creation = created.map_or(0, |t| days_between(t, now));
    let days_since_update = updated.map_or(0, |t| days_between(t, now));
    let days_since_verification = artifact
        .last_verified
        .map_or(-1, |t| days_between(t, now));

    let status = if !artifact.superseded_by.is_empty() {
        RelevanceStatus::Superseded
    } else if days_since_update > thresholds.deprecated_days {
        RelevanceStatus::Deprecated
    } else if days_since_update > thresholds.stale_days {
        RelevanceStatus::Stale
    } else if days_since_update > thresholds.aging_days {
        RelevanceStatus::Aging
    } else {
        RelevanceStatus::Current
    };

    RelevanceHealth {
        status,
        days_since_creation,
        days_since_update,
        days_since_verification,
        usage_count: artifact.execution_count,
        superseded_by: artifact.superseded_by.clone(),
    }
}

/// Score the assessment on [0, 100]: status base, age penalties, usage bonus.
pub fn score(health: &RelevanceHealth) -> f64 {
    let mut score: f64 = match health.status {
        RelevanceStatus::Deprecated => 10.0,
        RelevanceStatus::Superseded => 20.0,
        RelevanceStatus::Stale => 50.0,
        RelevanceStatus::Aging => 80.0,
        RelevanceStatus::Current => 100.0,
    };

    if health.days_since_update > 365 {
        score -= 10.0;
    }
    if health.days_since_verification > 180 {
        score -= 5.0;
    }
    if health.usage_count > 10 {
        score += 5.0;
    }

    score.clamp(0.0, 100.0)
}
