//! Drift alerts — ephemeral findings from one detection pass.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::curation::CurationAction;

/// Form of decay a drift alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    BrokenArtifact,
    OutdatedRunbook,
    DeprecatedApi,
    SupersededArtifact,
    MissingDependency,
    EnvironmentDrift,
    ContentStaleness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// One detected drift finding against one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAlert {
    pub artifact_id: String,
    pub kind: DriftKind,
    pub severity: Severity,
    pub message: String,
    /// Free-form detail map (BTreeMap keeps serialized output stable).
    #[serde(default)]
    pub details: BTreeMap<String, String>,
    pub recommended_action: CurationAction,
    pub detected_at: i64,
    /// Resolution state: unresolved while `None`.
    #[serde(default)]
    pub resolved_at: Option<i64>,
}

impl DriftAlert {
    pub fn new(
        artifact_id: impl Into<String>,
        kind: DriftKind,
        severity: Severity,
        message: impl Into<String>,
        recommended_action: CurationAction,
        detected_at: i64,
    ) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            kind,
            severity,
            message: message.into(),
            details: BTreeMap::new(),
            recommended_action,
            detected_at,
            resolved_at: None,
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_at.is_some()
    }

    /// Id of the newer artifact, for superseded-artifact alerts.
    pub fn similar_to(&self) -> Option<&str> {
        self.details.get("similar_to").map(String::as_str)
    }

    /// Title-overlap score, for superseded-artifact alerts.
    pub fn similarity(&self) -> Option<f64> {
        self.details.get("similarity").and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_detail_round_trips() {
        let alert = DriftAlert::new(
            "a", DriftKind::SupersededArtifact, Severity::Info,
            "similar to b", CurationAction::Merge, 1_000,
        )
        .with_detail("similar_to", "b")
        .with_detail("similarity", "0.82");

        let json = serde_json::to_string(&alert).unwrap();
        let back: DriftAlert = serde_json::from_str(&json).unwrap();
        assert_eq!(back, alert);
        assert_eq!(back.similar_to(), Some("b"));
        assert!((back.similarity().unwrap() - 0.82).abs() < 1e-9);
    }

    #[test]
    fn test_alert_starts_unresolved() {
        let alert = DriftAlert::new(
            "a", DriftKind::BrokenArtifact, Severity::Critical,
            "broken", CurationAction::Refactor, 0,
        );
        assert!(!alert.is_resolved());
        assert!(alert.similarity().is_none());
    }
}
