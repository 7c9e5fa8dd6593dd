//! Revalidation schedule persistence: one JSON document mapping artifact id
//! to its schedule, written atomically under an exclusive lock.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use rustc_hash::FxHashMap;
use tracing::debug;

use tend_core::errors::StorageError;
use tend_core::types::RevalidationSchedule;

/// Owns the schedule document's path and its lock file.
pub struct ScheduleStore {
    path: PathBuf,
}

impl ScheduleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Load the schedule map. A missing document means no schedules yet.
    pub fn load(&self) -> Result<FxHashMap<String, RevalidationSchedule>, StorageError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no schedule document yet");
            return Ok(FxHashMap::default());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| StorageError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        let parsed: BTreeMap<String, RevalidationSchedule> =
            serde_json::from_str(&raw).map_err(|e| StorageError::ParseError {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(parsed.into_iter().collect())
    }

    /// Persist the whole map in one atomic pass: exclusive lock, write to a
    /// temp file next to the target, rename into place.
    pub fn save(
        &self,
        schedules: &FxHashMap<String, RevalidationSchedule>,
    ) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StorageError::Io {
                path: lock_path.display().to_string(),
                message: e.to_string(),
            })?;
        let mut lock = fd_lock::RwLock::new(lock_file);
        let _guard = lock.write().map_err(|e| StorageError::LockFailed {
            path: lock_path.display().to_string(),
            message: e.to_string(),
        })?;

        // Stable key order keeps the document diffable.
        let ordered: BTreeMap<&String, &RevalidationSchedule> = schedules.iter().collect();
        let body = serde_json::to_string_pretty(&ordered).map_err(|e| StorageError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let tmp_path = self.path.with_extension("tmp");
        let mut tmp = File::create(&tmp_path).map_err(|e| StorageError::Io {
            path: tmp_path.display().to_string(),
            message: e.to_string(),
        })?;
        tmp.write_all(body.as_bytes()).map_err(|e| StorageError::Io {
            path: tmp_path.display().to_string(),
            message: e.to_string(),
        })?;
        tmp.sync_all().map_err(|e| StorageError::Io {
            path: tmp_path.display().to_string(),
            message: e.to_string(),
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StorageError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(path = %self.path.display(), count = schedules.len(), "schedules persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(id: &str, freq: u32) -> RevalidationSchedule {
        RevalidationSchedule::new(id, freq, 1_000)
    }

    #[test]
    fn test_missing_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduleStore::new(dir.path().join("schedules.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduleStore::new(dir.path().join("out/schedules.json"));

        let mut map = FxHashMap::default();
        map.insert("a".to_string(), schedule("a", 7));
        map.insert("b".to_string(), schedule("b", 1));
        store.save(&map).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded["b"].frequency_days, 1);
        assert_eq!(loaded["a"], map["a"]);
    }

    #[test]
    fn test_save_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScheduleStore::new(dir.path().join("schedules.json"));

        let mut map = FxHashMap::default();
        map.insert("a".to_string(), schedule("a", 7));
        store.save(&map).unwrap();

        map.remove("a");
        map.insert("b".to_string(), schedule("b", 3));
        store.save(&map).unwrap();

        let loaded = store.load().unwrap();
        assert!(!loaded.contains_key("a"));
        assert!(loaded.contains_key("b"));
    }

    #[test]
    fn test_malformed_document_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.json");
        fs::write(&path, "[]").unwrap();
        let store = ScheduleStore::new(path);
        assert!(matches!(
            store.load().unwrap_err(),
            StorageError::ParseError { .. }
        ));
    }
}
