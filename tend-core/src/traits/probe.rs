//! RuntimeProbe trait — host environment facts.
//!
//! Probing the host (interpreter versions, available binaries) is owned by
//! an external collaborator. The scorer only consumes the facts; a
//! `StaticProbe` carries pre-probed answers for standalone use and tests.

use std::collections::HashMap;

/// Supplier of host environment facts for environment scoring.
pub trait RuntimeProbe: Send + Sync {
    /// Detected runtime version for a language (e.g. "3.12.1" for python),
    /// or `None` when the host has no such runtime / was not probed.
    fn runtime_version(&self, language: &str) -> Option<String>;

    /// Whether the named binary is available on the host.
    /// Unprobed binaries default to present — absence must be a positive
    /// observation, not a gap in probing.
    fn binary_available(&self, name: &str) -> bool {
        let _ = name;
        true
    }
}

/// Fixed-answer probe built from pre-gathered host facts.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    runtimes: HashMap<String, String>,
    missing_binaries: Vec<String>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime(mut self, language: &str, version: &str) -> Self {
        self.runtimes.insert(language.to_lowercase(), version.to_string());
        self
    }

    pub fn with_missing_binary(mut self, name: &str) -> Self {
        self.missing_binaries.push(name.to_string());
        self
    }
}

impl RuntimeProbe for StaticProbe {
    fn runtime_version(&self, language: &str) -> Option<String> {
        self.runtimes.get(&language.to_lowercase()).cloned()
    }

    fn binary_available(&self, name: &str) -> bool {
        !self.missing_binaries.iter().any(|b| b == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_probe_reports_configured_facts() {
        let probe = StaticProbe::new()
            .with_runtime("python", "3.12.1")
            .with_missing_binary("node");
        assert_eq!(probe.runtime_version("Python").as_deref(), Some("3.12.1"));
        assert!(probe.runtime_version("ruby").is_none());
        assert!(!probe.binary_available("node"));
        assert!(probe.binary_available("bash"));
    }
}
