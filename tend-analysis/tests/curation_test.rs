//! Curation integration tests: rule ordering, determinism, and the batch
//! queries' caps and sort orders.

use rustc_hash::FxHashMap;

use tend_analysis::CurationEngine;
use tend_core::config::HealthConfig;
use tend_core::types::{
    Artifact, ArtifactIndex, ArtifactKind, CurationAction, DependencyHealth, DependencyStatus,
    DriftAlert, DriftKind, EnvironmentHealth, EnvironmentStatus, ExecutionHistory,
    HealthMetrics, HealthStatus, Priority, RelevanceHealth, RelevanceStatus, Severity,
};

fn base_metrics(id: &str, score: f64, status: HealthStatus) -> HealthMetrics {
    HealthMetrics {
        artifact_id: id.to_string(),
        health_score: score,
        status,
        dependency: DependencyHealth::empty(),
        environment: EnvironmentHealth {
            status: EnvironmentStatus::Compatible,
            declared_runtime: String::new(),
            detected_runtime: String::new(),
            runtime_mismatch: false,
            missing_binaries: Vec::new(),
        },
        relevance: RelevanceHealth {
            status: RelevanceStatus::Current,
            days_since_creation: 30,
            days_since_update: 30,
            days_since_verification: 30,
            usage_count: 0,
            superseded_by: Vec::new(),
        },
        execution: ExecutionHistory::default(),
        checked_at: 0,
    }
}

fn title_artifact(id: &str, kind: ArtifactKind, title: &str) -> Artifact {
    Artifact {
        id: id.to_string(),
        title: title.to_string(),
        path: format!("{id}.md"),
        kind,
        language: String::new(),
        runtime: String::new(),
        dependencies: Vec::new(),
        created_at: None,
        updated_at: None,
        last_verified: None,
        runnable_status: Default::default(),
        execution_count: 0,
        superseded_by: Vec::new(),
    }
}

/// Decayed wins over every other condition, including critical-grade faults
/// present on the same artifact.
#[test]
fn test_decayed_outranks_all_other_rules() {
    let engine = CurationEngine::new(HealthConfig::default());
    let mut m = base_metrics("a", 5.0, HealthStatus::Decayed);
    m.dependency.status = DependencyStatus::Broken;
    m.environment.status = EnvironmentStatus::Incompatible;
    m.relevance.status = RelevanceStatus::Deprecated;

    let rec = engine.recommend(&m, &[]).unwrap();
    assert_eq!(rec.action, CurationAction::Archive);
    assert!((rec.confidence - 0.9).abs() < 1e-9);
}

/// Within the critical triage rule, broken dependencies beat incompatible
/// environments, which beat repeated execution failures.
#[test]
fn test_critical_internal_ordering() {
    let engine = CurationEngine::new(HealthConfig::default());

    let mut both = base_metrics("a", 30.0, HealthStatus::Critical);
    both.dependency.status = DependencyStatus::Broken;
    both.environment.status = EnvironmentStatus::Incompatible;
    let rec = engine.recommend(&both, &[]).unwrap();
    assert!(rec.reason.contains("dependency"), "broken deps checked first");

    let mut env_only = base_metrics("b", 30.0, HealthStatus::Critical);
    env_only.environment.status = EnvironmentStatus::Incompatible;
    env_only.execution.failed_runs = 10;
    let rec = engine.recommend(&env_only, &[]).unwrap();
    assert!(rec.reason.contains("Environment"));

    let mut failures_only = base_metrics("c", 30.0, HealthStatus::Critical);
    failures_only.execution.failed_runs = 4;
    let rec = engine.recommend(&failures_only, &[]).unwrap();
    assert_eq!(rec.action, CurationAction::Refactor);
    assert!((rec.confidence - 0.8).abs() < 1e-9);
}

/// Stale relevance with a deprecated-API alert upgrades the update to
/// medium priority with higher confidence.
#[test]
fn test_stale_with_api_alert_upgrades() {
    let engine = CurationEngine::new(HealthConfig::default());
    let mut m = base_metrics("a", 60.0, HealthStatus::Degraded);
    m.relevance.status = RelevanceStatus::Stale;

    let plain = engine.recommend(&m, &[]).unwrap();
    assert_eq!(plain.priority, Priority::Low);
    assert!((plain.confidence - 0.6).abs() < 1e-9);

    let alert = DriftAlert::new(
        "a",
        DriftKind::DeprecatedApi,
        Severity::Warning,
        "DataFrame.append is deprecated, use concat",
        CurationAction::Update,
        0,
    );
    let upgraded = engine.recommend(&m, &[alert]).unwrap();
    assert_eq!(upgraded.priority, Priority::Medium);
    assert!((upgraded.confidence - 0.75).abs() < 1e-9);
    assert!(upgraded.reason.contains("concat"));
}

/// Same inputs, same answer: the rule walk has no hidden state.
#[test]
fn test_recommendation_is_deterministic() {
    let engine = CurationEngine::new(HealthConfig::default());
    let mut m = base_metrics("a", 60.0, HealthStatus::Degraded);
    m.dependency.status = DependencyStatus::Stale;

    let first = engine.recommend(&m, &[]).unwrap();
    for _ in 0..5 {
        assert_eq!(engine.recommend(&m, &[]).unwrap(), first);
    }
}

/// Merge candidates: dedup by unordered pair, similarity above 0.6 only,
/// descending, capped at 20.
#[test]
fn test_merge_candidates_dedup_and_cap() {
    let engine = CurationEngine::new(HealthConfig::default());
    let mut artifacts = Vec::new();
    // 25 notebooks sharing a title guarantee far more than 20 close pairs.
    for i in 0..25 {
        artifacts.push(title_artifact(
            &format!("nb-{i}"),
            ArtifactKind::Notebook,
            "monthly revenue rollup",
        ));
    }
    artifacts.push(title_artifact("lone", ArtifactKind::Notebook, "unrelated thing entirely"));

    let candidates = engine.merge_candidates(&ArtifactIndex { artifacts });
    assert_eq!(candidates.len(), 20);
    assert!(candidates.iter().all(|(a, b, s)| a != b && *s > 0.6));
    for window in candidates.windows(2) {
        assert!(window[0].2 >= window[1].2, "sorted by similarity descending");
    }
}

/// Refactor targets only come from critical or decayed artifacts.
#[test]
fn test_refactor_targets_filter_by_status() {
    let engine = CurationEngine::new(HealthConfig::default());
    let mut map = FxHashMap::default();
    map.insert("healthy".to_string(), {
        let mut m = base_metrics("healthy", 95.0, HealthStatus::Healthy);
        m.dependency.status = DependencyStatus::Broken;
        m
    });
    map.insert("critical".to_string(), {
        let mut m = base_metrics("critical", 30.0, HealthStatus::Critical);
        m.dependency.status = DependencyStatus::Broken;
        m
    });

    let targets = engine.refactor_targets(&map);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].artifact_id, "critical");
    assert_eq!(targets[0].priority, Priority::High);
}

/// The gold bar requires all criteria at once.
#[test]
fn test_gold_bar_is_conjunctive() {
    let engine = CurationEngine::new(HealthConfig::default());

    let mut gold = base_metrics("gold", 95.0, HealthStatus::Healthy);
    gold.execution.total_attempts = 10;
    gold.execution.successful_runs = 10;

    let mut too_stale = gold.clone();
    too_stale.artifact_id = "stale".to_string();
    too_stale.relevance.days_since_update = 200;

    let mut flaky = gold.clone();
    flaky.artifact_id = "flaky".to_string();
    flaky.execution.successful_runs = 8;
    flaky.execution.failed_runs = 2;

    let mut map = FxHashMap::default();
    map.insert("gold".to_string(), gold);
    map.insert("stale".to_string(), too_stale);
    map.insert("flaky".to_string(), flaky);

    let golds = engine.gold_candidates(&map);
    assert_eq!(golds.len(), 1);
    assert_eq!(golds[0].artifact_id, "gold");
    assert_eq!(golds[0].action, CurationAction::PromoteGold);
}
