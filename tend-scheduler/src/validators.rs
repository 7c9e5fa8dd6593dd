//! Per-kind validator registry with panic isolation.
//!
//! Built-in validators are structural only: they inspect artifact files
//! without executing any content. Deep validation (actually running a
//! script or notebook) belongs to the embedding application, which
//! registers its own `Validator` implementations here.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::warn;

use tend_core::traits::{ValidationOutcome, Validator};
use tend_core::types::{Artifact, ArtifactKind};

/// Validators keyed by artifact kind.
///
/// A kind with no registered validator is not a failure: the outcome is a
/// success carrying a warning, since "cannot validate" must never count
/// against the artifact. Panics inside a validator are caught and become a
/// failed outcome for that artifact only.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: FxHashMap<ArtifactKind, Box<dyn Validator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in structural validators.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ArtifactKind::Notebook, Box::new(NotebookValidator));
        registry.register(ArtifactKind::Runbook, Box::new(RunbookValidator));
        registry.register(ArtifactKind::Script, Box::new(ScriptValidator));
        registry.register(ArtifactKind::Template, Box::new(TemplateValidator));
        registry
    }

    pub fn register(&mut self, kind: ArtifactKind, validator: Box<dyn Validator>) {
        self.validators.insert(kind, validator);
    }

    pub fn has_validator(&self, kind: ArtifactKind) -> bool {
        self.validators.contains_key(&kind)
    }

    /// Validate one artifact, isolating validator faults.
    pub fn validate(
        &self,
        artifact: &Artifact,
        repo_root: &Path,
        timeout: Duration,
    ) -> ValidationOutcome {
        let Some(validator) = self.validators.get(&artifact.kind) else {
            return ValidationOutcome::success().with_warning(format!(
                "no validator registered for kind '{}'",
                artifact.kind.as_str()
            ));
        };

        match panic::catch_unwind(AssertUnwindSafe(|| {
            validator.validate(artifact, repo_root, timeout)
        })) {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(artifact_id = %artifact.id, "validator panicked");
                ValidationOutcome::failure(format!(
                    "validator for kind '{}' panicked",
                    artifact.kind.as_str()
                ))
            }
        }
    }
}

fn read_artifact(artifact: &Artifact, repo_root: &Path) -> Result<String, ValidationOutcome> {
    let path = repo_root.join(&artifact.path);
    if !path.exists() {
        return Err(ValidationOutcome::failure(format!(
            "artifact file not found: {}",
            path.display()
        )));
    }
    fs::read_to_string(&path).map_err(|e| {
        ValidationOutcome::failure(format!("could not read {}: {e}", path.display()))
    })
}

/// Parses the notebook document and flags cells with recorded error
/// outputs. Never executes cells.
pub struct NotebookValidator;

impl Validator for NotebookValidator {
    fn validate(
        &self,
        artifact: &Artifact,
        repo_root: &Path,
        _timeout: Duration,
    ) -> ValidationOutcome {
        let content = match read_artifact(artifact, repo_root) {
            Ok(content) => content,
            Err(outcome) => return outcome,
        };

        let notebook: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => return ValidationOutcome::failure(format!("notebook is not valid JSON: {e}")),
        };

        let mut outcome = ValidationOutcome::success();
        let cells = notebook
            .get("cells")
            .and_then(|c| c.as_array())
            .cloned()
            .unwrap_or_default();
        for (i, cell) in cells.iter().enumerate() {
            if cell.get("cell_type").and_then(|t| t.as_str()) != Some("code") {
                continue;
            }
            let error = cell
                .get("outputs")
                .and_then(|o| o.as_array())
                .and_then(|outs| {
                    outs.iter()
                        .find(|o| o.get("output_type").and_then(|t| t.as_str()) == Some("error"))
                });
            if let Some(error) = error {
                let ename = error
                    .get("ename")
                    .and_then(|e| e.as_str())
                    .unwrap_or("Unknown");
                outcome.success = false;
                outcome.errors.push(format!("cell {} has error: {ename}", i + 1));
            }
        }
        outcome
    }
}

/// Checks a runbook for its expected sections and at least one code block.
/// Structural gaps are warnings, not failures.
pub struct RunbookValidator;

const RUNBOOK_SECTIONS: &[&str] = &["## Scope", "## When to Use", "## Verification"];

impl Validator for RunbookValidator {
    fn validate(
        &self,
        artifact: &Artifact,
        repo_root: &Path,
        _timeout: Duration,
    ) -> ValidationOutcome {
        let content = match read_artifact(artifact, repo_root) {
            Ok(content) => content,
            Err(outcome) => return outcome,
        };

        let mut outcome = ValidationOutcome::success();
        for section in RUNBOOK_SECTIONS {
            if !content.contains(section) {
                outcome = outcome.with_warning(format!("missing recommended section: {section}"));
            }
        }
        if !content.contains("```") {
            outcome = outcome.with_warning("no code blocks found in runbook");
        }
        outcome
    }
}

/// Checks that a script file exists and has runnable content. Actually
/// executing or syntax-checking the script belongs to the embedding
/// application's validator.
pub struct ScriptValidator;

impl Validator for ScriptValidator {
    fn validate(
        &self,
        artifact: &Artifact,
        repo_root: &Path,
        _timeout: Duration,
    ) -> ValidationOutcome {
        let content = match read_artifact(artifact, repo_root) {
            Ok(content) => content,
            Err(outcome) => return outcome,
        };

        if content.trim().is_empty() {
            return ValidationOutcome::failure("script file is empty");
        }
        ValidationOutcome::success()
    }
}

/// Sanity checks a template file: it must exist and carry enough content
/// to be worth instantiating.
pub struct TemplateValidator;

impl Validator for TemplateValidator {
    fn validate(
        &self,
        artifact: &Artifact,
        repo_root: &Path,
        _timeout: Duration,
    ) -> ValidationOutcome {
        let content = match read_artifact(artifact, repo_root) {
            Ok(content) => content,
            Err(outcome) => return outcome,
        };

        let mut outcome = ValidationOutcome::success();
        if content.len() < 100 {
            outcome = outcome.with_warning("template is very short");
        }
        outcome
    }
}
