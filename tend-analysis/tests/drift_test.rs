//! Drift detection integration tests: content scans, runbook structure,
//! error-log analysis, and the cross-artifact supersession pass.

use std::sync::Arc;

use proptest::prelude::*;
use rustc_hash::FxHashMap;

use tend_analysis::drift::{similarity, DriftDetector};
use tend_analysis::scoring::HealthScorer;
use tend_core::config::HealthConfig;
use tend_core::time::SECS_PER_DAY;
use tend_core::traits::StaticProbe;
use tend_core::types::{
    Artifact, ArtifactIndex, ArtifactKind, CurationAction, DriftKind, HealthMetrics,
    RunnableStatus, Severity,
};

fn artifact(id: &str, kind: ArtifactKind, path: &str, title: &str) -> Artifact {
    Artifact {
        id: id.to_string(),
        title: title.to_string(),
        path: path.to_string(),
        kind,
        language: "python".into(),
        runtime: String::new(),
        dependencies: Vec::new(),
        created_at: Some(0),
        updated_at: Some(0),
        last_verified: None,
        runnable_status: Default::default(),
        execution_count: 0,
        superseded_by: Vec::new(),
    }
}

fn score(artifact: &Artifact, now: i64) -> HealthMetrics {
    let scorer = HealthScorer::new(HealthConfig::default(), Arc::new(StaticProbe::new()));
    scorer.score(artifact, None, now)
}

/// A runbook missing two of its three required sections is flagged; the
/// full detect pass also picks up deprecated API usage in the same file.
#[test]
fn test_runbook_and_content_checks_combine() {
    let now = 100 * SECS_PER_DAY;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("deploy.md"),
        "# Deploy\n\n## Scope\n\nuses pandas.DataFrame.append internally\n",
    )
    .unwrap();

    let detector = DriftDetector::new(HealthConfig::default(), dir.path());
    let a = artifact("rb-1", ArtifactKind::Runbook, "deploy.md", "Deploy");
    let m = score(&a, now);

    let alerts = detector.detect(&a, &m, now);
    assert!(alerts.iter().any(|al| al.kind == DriftKind::OutdatedRunbook));
    assert!(alerts.iter().any(|al| al.kind == DriftKind::DeprecatedApi));
}

/// Broken runnable status raises a critical alert recommending refactor.
#[test]
fn test_broken_status_alert_shape() {
    let now = 100 * SECS_PER_DAY;
    let dir = tempfile::tempdir().unwrap();
    let detector = DriftDetector::new(HealthConfig::default(), dir.path());
    let mut a = artifact("s-1", ArtifactKind::Script, "gone.py", "script");
    a.runnable_status = RunnableStatus::Broken;
    let m = score(&a, now);

    let alerts = detector.detect(&a, &m, now);
    let broken = alerts
        .iter()
        .find(|al| al.kind == DriftKind::BrokenArtifact)
        .expect("broken status must alert");
    assert_eq!(broken.severity, Severity::Critical);
    assert_eq!(broken.recommended_action, CurationAction::Refactor);
    assert!(broken.resolved_at.is_none());
}

/// Error-log analysis works on text that never touched the filesystem.
#[test]
fn test_error_log_is_standalone() {
    let detector = DriftDetector::new(HealthConfig::default(), "/nonexistent");
    let alerts = detector.analyze_error_log(
        "nb-9",
        "ImportError: cannot import name 'melt'\nFileNotFoundError: data.csv",
        1_000,
    );
    assert_eq!(alerts.len(), 2);
    assert!(alerts.iter().all(|a| a.artifact_id == "nb-9"));
    assert!(alerts.iter().all(|a| a.severity == Severity::Critical));
}

/// Supersession: three near-identical runbooks produce one alert per
/// qualifying pair, each against the older artifact of its pair.
#[test]
fn test_supersession_is_per_pair() {
    let now = 100 * SECS_PER_DAY;
    let detector = DriftDetector::new(HealthConfig::default(), "/nonexistent");

    let mut a = artifact("a", ArtifactKind::Runbook, "a.md", "restart payment service");
    let mut b = artifact("b", ArtifactKind::Runbook, "b.md", "restart payment service");
    let c = artifact("c", ArtifactKind::Runbook, "c.md", "restart payment service");
    a.last_verified = Some(now);
    b.last_verified = Some(now - SECS_PER_DAY);

    let index = ArtifactIndex { artifacts: vec![a.clone(), b.clone(), c.clone()] };
    let mut metrics = FxHashMap::default();
    for art in &index.artifacts {
        metrics.insert(art.id.clone(), score(art, now));
    }

    let alerts = detector.detect_superseded(&index, &metrics, now);
    // Pairs (a,b), (a,c), (b,c) all overlap fully. c is never verified so
    // it loses both of its pairs; the a/b pair ties and keeps the first.
    assert_eq!(alerts.len(), 3);
    let against_c = alerts.iter().filter(|al| al.artifact_id == "c").count();
    assert_eq!(against_c, 2, "unverified artifact is the older of both its pairs");
    assert!(alerts.iter().all(|al| al.severity == Severity::Info));
}

/// detect_all skips artifacts absent from the metrics map rather than
/// failing the batch.
#[test]
fn test_detect_all_tolerates_missing_metrics() {
    let now = 100 * SECS_PER_DAY;
    let detector = DriftDetector::new(HealthConfig::default(), "/nonexistent");
    let a = artifact("known", ArtifactKind::Script, "k.py", "known");
    let b = artifact("unknown", ArtifactKind::Script, "u.py", "unscored thing");

    let index = ArtifactIndex { artifacts: vec![a.clone(), b] };
    let mut metrics = FxHashMap::default();
    metrics.insert("known".to_string(), score(&a, now));

    // Must not panic; per-artifact alerts only for scored artifacts.
    let alerts = detector.detect_all(&index, &metrics, now);
    assert!(alerts.iter().all(|al| al.artifact_id != "unknown" || al.kind == DriftKind::SupersededArtifact));
}

proptest! {
    /// Title similarity is symmetric and bounded.
    #[test]
    fn prop_similarity_symmetric(title_a in "[a-z]{1,8}( [a-z]{1,8}){0,5}",
                                 title_b in "[a-z]{1,8}( [a-z]{1,8}){0,5}") {
        let a = artifact("a", ArtifactKind::Notebook, "a.ipynb", &title_a);
        let b = artifact("b", ArtifactKind::Notebook, "b.ipynb", &title_b);
        let ab = similarity::title_similarity(&a, &b);
        let ba = similarity::title_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    /// A title is always fully similar to itself.
    #[test]
    fn prop_similarity_reflexive(title in "[a-z]{1,8}( [a-z]{1,8}){0,5}") {
        let a = artifact("a", ArtifactKind::Notebook, "a.ipynb", &title);
        let b = artifact("b", ArtifactKind::Notebook, "b.ipynb", &title);
        prop_assert!((similarity::title_similarity(&a, &b) - 1.0).abs() < 1e-12);
    }
}
