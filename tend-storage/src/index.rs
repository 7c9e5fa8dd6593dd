//! Artifact-index loading. The index is produced by the external indexer;
//! this side only reads it.

use std::fs;
use std::path::Path;

use tracing::warn;

use tend_core::errors::StorageError;
use tend_core::types::ArtifactIndex;

/// Load the artifact index document from `path`.
///
/// A missing file is an empty knowledge base, not an error. A present but
/// malformed file is a real fault and is reported as a parse error.
pub fn load_index(path: &Path) -> Result<ArtifactIndex, StorageError> {
    if !path.exists() {
        warn!(path = %path.display(), "artifact index not found, treating as empty");
        return Ok(ArtifactIndex::default());
    }

    let raw = fs::read_to_string(path).map_err(|e| StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&raw).map_err(|e| StorageError::ParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
