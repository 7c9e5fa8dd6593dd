//! The artifact index model — read-only input owned by the external indexer.

use serde::{Deserialize, Serialize};

use crate::types::health::DependencyStatus;

/// Kind of knowledge artifact tracked by the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Notebook,
    Runbook,
    Script,
    Template,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Notebook => "notebook",
            ArtifactKind::Runbook => "runbook",
            ArtifactKind::Script => "script",
            ArtifactKind::Template => "template",
        }
    }
}

/// Whether the indexer last observed the artifact to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnableStatus {
    Runnable,
    Broken,
    #[default]
    Unknown,
}

/// How a dependency record made it into the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencySource {
    AutoDetected,
    Declared,
    Lockfile,
}

/// One dependency of an artifact, as recorded by the indexer.
///
/// `status` is an optional hint from the indexer's own resolution results
/// (e.g. a lockfile entry that no longer resolves is marked broken). When
/// absent, source-based classification applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRef {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    pub source: DependencySource,
    #[serde(default)]
    pub status: Option<DependencyStatus>,
}

/// A discrete piece of recorded knowledge. Produced by the external
/// indexing collaborator; the core never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,
    /// Epoch seconds; absent when the indexer could not determine them.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub last_verified: Option<i64>,
    #[serde(default)]
    pub runnable_status: RunnableStatus,
    #[serde(default)]
    pub execution_count: u32,
    /// Ids of artifacts that replace this one, when the indexer knows.
    #[serde(default)]
    pub superseded_by: Vec<String>,
}

/// The full artifact index document: an ordered collection of artifacts
/// with stable string ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtifactIndex {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl ArtifactIndex {
    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
