//! Report file output: `knowledge_health.json` plus its markdown rendering.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use tend_analysis::HealthReport;
use tend_core::errors::StorageError;

/// Writes the paired JSON and markdown reports under one output directory.
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into() }
    }

    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join("knowledge_health.json")
    }

    pub fn markdown_path(&self) -> PathBuf {
        self.output_dir.join("knowledge_health.md")
    }

    /// Write both report files, returning their paths.
    pub fn write(&self, report: &HealthReport) -> Result<(PathBuf, PathBuf), StorageError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| StorageError::Io {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let json_path = self.json_path();
        let body = serde_json::to_string_pretty(report).map_err(|e| StorageError::Io {
            path: json_path.display().to_string(),
            message: e.to_string(),
        })?;
        write_atomic(&json_path, &body)?;

        let md_path = self.markdown_path();
        write_atomic(&md_path, &report.to_markdown())?;

        info!(
            json = %json_path.display(),
            markdown = %md_path.display(),
            "health reports written"
        );
        Ok((json_path, md_path))
    }
}

fn write_atomic(path: &Path, body: &str) -> Result<(), StorageError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, body).map_err(|e| StorageError::Io {
        path: tmp.display().to_string(),
        message: e.to_string(),
    })?;
    fs::rename(&tmp, path).map_err(|e| StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("reports"));
        let report = HealthReport::assemble(
            "/repo",
            BTreeMap::new(),
            Vec::new(),
            Vec::new(),
            None,
            1_000,
        );

        let (json_path, md_path) = writer.write(&report).unwrap();
        assert!(json_path.exists());
        assert!(md_path.exists());

        let back: HealthReport =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(back.generated_at, 1_000);

        let md = fs::read_to_string(&md_path).unwrap();
        assert!(md.starts_with("# Knowledge Health Report"));
    }
}
