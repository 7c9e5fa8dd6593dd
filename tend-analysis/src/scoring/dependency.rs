//! Dependency sub-health: classification, worst-status aggregation, score.

use tend_core::types::{Artifact, DependencyHealth, DependencyRef, DependencyStatus};

use super::stdlib;

/// Classify one dependency record.
///
/// An indexer-supplied status hint wins. Otherwise: lockfile and declared
/// sources are taken at their word as current; auto-detected names count as
/// current only when they resolve to the language's standard library.
fn classify(dep: &DependencyRef, language: &str) -> DependencyStatus {
    if let Some(status) = dep.status {
        return status;
    }
    match dep.source {
        tend_core::types::DependencySource::Lockfile
        | tend_core::types::DependencySource::Declared => DependencyStatus::Current,
        tend_core::types::DependencySource::AutoDetected => {
            if stdlib::is_stdlib(language, &dep.name) {
                DependencyStatus::Current
            } else {
                DependencyStatus::Unknown
            }
        }
    }
}

/// Assess the dependency set of an artifact.
pub fn assess(artifact: &Artifact) -> DependencyHealth {
    let mut health = DependencyHealth::empty();
    health.total = artifact.dependencies.len();
    if artifact.dependencies.is_empty() {
        return health;
    }

    let mut worst = DependencyStatus::Current;
    for dep in &artifact.dependencies {
        let status = classify(dep, &artifact.language);
        match status {
            DependencyStatus::Current => health.current += 1,
            DependencyStatus::Outdated => {
                health.outdated += 1;
                health.issues.push(format!("Outdated dependency: {}", dep.name));
            }
            DependencyStatus::Stale => {
                health.stale += 1;
                health.issues.push(format!("Stale dependency: {}", dep.name));
            }
            DependencyStatus::Broken => {
                health.broken += 1;
                health.issues.push(format!("Broken dependency: {}", dep.name));
            }
            DependencyStatus::Unknown => {
                health.unknown += 1;
                health.issues.push(format!("Unversioned dependency: {}", dep.name));
            }
        }
        if status.rank() > worst.rank() {
            worst = status;
        }
    }

    // Mostly-unresolvable sets degrade to unknown as a whole; otherwise the
    // worst observed status speaks for the set.
    health.status = if health.unknown * 2 > health.total {
        DependencyStatus::Unknown
    } else {
        worst
    };
    health
}

/// Score the assessment on [0, 100].
///
/// Start from 100, subtract weighted penalties, then cap by the worst
/// observed status so a single broken dependency cannot hide behind an
/// otherwise clean set.
pub fn score(health: &DependencyHealth) -> f64 {
    if health.total == 0 {
        return 100.0;
    }

    let penalty = health.broken as f64 * 30.0
        + health.stale as f64 * 20.0
        + health.outdated as f64 * 10.0
        + health.unknown as f64 * 5.0;
    let mut score = 100.0 - penalty;

    let cap = if health.broken > 0 {
        20.0
    } else if health.stale > 0 {
        50.0
    } else if health.unknown > 0 {
        70.0
    } else {
        100.0
    };

    score = score.min(cap);
    score.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tend_core::types::{ArtifactKind, DependencySource};

    fn artifact_with_deps(language: &str, deps: Vec<DependencyRef>) -> Artifact {
        Artifact {
            id: "a".into(),
            title: String::new(),
            path: "a.py".into(),
            kind: ArtifactKind::Script,
            language: language.into(),
            runtime: String::new(),
            dependencies: deps,
            created_at: None,
            updated_at: None,
            last_verified: None,
            runnable_status: Default::default(),
            execution_count: 0,
            superseded_by: Vec::new(),
        }
    }

    fn dep(name: &str, source: DependencySource, status: Option<DependencyStatus>) -> DependencyRef {
        DependencyRef { name: name.into(), version: None, source, status }
    }

    #[test]
    fn test_zero_dependencies_scores_100() {
        let artifact = artifact_with_deps("python", vec![]);
        let health = assess(&artifact);
        assert_eq!(health.status, DependencyStatus::Current);
        assert_eq!(score(&health), 100.0);
    }

    #[test]
    fn test_stdlib_auto_detected_counts_as_current() {
        let artifact = artifact_with_deps(
            "python",
            vec![
                dep("json", DependencySource::AutoDetected, None),
                dep("pathlib", DependencySource::AutoDetected, None),
            ],
        );
        let health = assess(&artifact);
        assert_eq!(health.current, 2);
        assert_eq!(health.status, DependencyStatus::Current);
    }

    #[test]
    fn test_unknown_heavy_set_capped_at_70() {
        let artifact = artifact_with_deps(
            "python",
            vec![
                dep("pandas", DependencySource::AutoDetected, None),
                dep("numpy", DependencySource::AutoDetected, None),
                dep("json", DependencySource::AutoDetected, None),
            ],
        );
        let health = assess(&artifact);
        assert_eq!(health.unknown, 2);
        assert_eq!(health.status, DependencyStatus::Unknown);
        // 100 - 2*5 = 90, capped to 70
        assert_eq!(score(&health), 70.0);
    }

    /// Five broken dependencies → score capped at 20.
    #[test]
    fn test_all_broken_capped_at_20() {
        let deps = (0..5)
            .map(|i| {
                dep(
                    &format!("pkg{i}"),
                    DependencySource::Lockfile,
                    Some(DependencyStatus::Broken),
                )
            })
            .collect();
        let artifact = artifact_with_deps("python", deps);
        let health = assess(&artifact);
        assert_eq!(health.broken, 5);
        assert_eq!(health.status, DependencyStatus::Broken);
        // 100 - 150 < 0, clamped to 0 (cap at 20 is not a floor)
        assert_eq!(score(&health), 0.0);
    }

    #[test]
    fn test_single_broken_dep_capped() {
        let artifact = artifact_with_deps(
            "python",
            vec![dep("old-lib", DependencySource::Lockfile, Some(DependencyStatus::Broken))],
        );
        let health = assess(&artifact);
        // 100 - 30 = 70, capped to 20 by broken status
        assert_eq!(score(&health), 20.0);
    }

    #[test]
    fn test_adding_broken_deps_never_raises_score() {
        let mut deps = vec![dep("a", DependencySource::Declared, None)];
        let mut previous = {
            let health = assess(&artifact_with_deps("python", deps.clone()));
            score(&health)
        };
        for i in 0..4 {
            deps.push(dep(
                &format!("broken{i}"),
                DependencySource::Lockfile,
                Some(DependencyStatus::Broken),
            ));
            let current = score(&assess(&artifact_with_deps("python", deps.clone())));
            assert!(current <= previous, "score rose when a broken dep was added");
            previous = current;
        }
    }
}
