//! Environment sub-health: runtime version drift and missing interpreters.

use tend_core::config::HealthConfig;
use tend_core::traits::RuntimeProbe;
use tend_core::types::{Artifact, EnvironmentHealth, EnvironmentStatus};

/// Interpreter binary an artifact language depends on, when any.
fn required_binary(language: &str) -> Option<&'static str> {
    match language.to_lowercase().as_str() {
        "javascript" | "typescript" | "node" => Some("node"),
        "python" => Some("python3"),
        "ruby" => Some("ruby"),
        _ => None,
    }
}

fn major_version(version: &str) -> Option<u32> {
    version.split('.').next()?.trim().parse().ok()
}

/// Assess environment compatibility against probed host facts.
///
/// Incompatible when a required interpreter is positively absent; drifted
/// when declared and detected major versions disagree; unknown when the
/// artifact declares nothing and the probe detected nothing.
pub fn assess(artifact: &Artifact, probe: &dyn RuntimeProbe) -> EnvironmentHealth {
    let declared = artifact.runtime.trim().to_string();
    let detected = probe
        .runtime_version(&artifact.language)
        .unwrap_or_default();

    let mut health = EnvironmentHealth {
        status: EnvironmentStatus::Compatible,
        declared_runtime: declared.clone(),
        detected_runtime: detected.clone(),
        runtime_mismatch: false,
        missing_binaries: Vec::new(),
    };

    if declared.is_empty() && detected.is_empty() {
        health.status = EnvironmentStatus::Unknown;
    } else if let (Some(declared_major), Some(detected_major)) =
        (major_version(&declared), major_version(&detected))
    {
        if declared_major != detected_major {
            health.runtime_mismatch = true;
            health.status = EnvironmentStatus::Drifted;
        }
    }

    if let Some(binary) = required_binary(&artifact.language) {
        if !probe.binary_available(binary) {
            health.missing_binaries.push(binary.to_string());
            health.status = EnvironmentStatus::Incompatible;
        }
    }

    health
}

/// Fixed status mapping. Unknown is moderately concerning, not fatal.
pub fn score(health: &EnvironmentHealth, config: &HealthConfig) -> f64 {
    match health.status {
        EnvironmentStatus::Incompatible => 0.0,
        EnvironmentStatus::Drifted => 60.0,
        EnvironmentStatus::Compatible => 100.0,
        EnvironmentStatus::Unknown => config.unknown_environment_score,
    }
}
