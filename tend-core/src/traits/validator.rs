//! Validator trait — content verification delegated to external executors.
//!
//! Actually parsing or executing artifact content is out of scope for the
//! core; a validator per artifact kind is registered by the embedding
//! application. Faults (syntax errors, timeouts, missing runtimes) are
//! captured as strings inside the outcome, never raised.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Artifact;

/// Result of one validation call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn success() -> Self {
        Self { success: true, errors: Vec::new(), warnings: Vec::new() }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { success: false, errors: vec![error.into()], warnings: Vec::new() }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

/// External content validator for one artifact kind.
///
/// Calls are blocking I/O; implementations must honor the caller-supplied
/// `timeout` and report an expired deadline as a failed outcome.
pub trait Validator: Send + Sync {
    fn validate(&self, artifact: &Artifact, repo_root: &Path, timeout: Duration)
        -> ValidationOutcome;
}
