//! Error handling for Tend.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use storage_error::StorageError;
