//! Storage errors for persisted documents (index, schedules, reports).

/// Errors that can occur reading or writing persisted state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O failure at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Could not acquire exclusive lock on {path}: {message}")]
    LockFailed { path: String, message: String },
}
