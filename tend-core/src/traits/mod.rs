//! Collaborator traits — the seams where external subsystems plug in.
//!
//! Each trait ships with a static/no-op default implementation so the
//! engine runs standalone and tests can substitute fixed facts.

pub mod history;
pub mod probe;
pub mod validator;

pub use history::{HistoryProvider, NoHistory, StaticHistory};
pub use probe::{RuntimeProbe, StaticProbe};
pub use validator::{ValidationOutcome, Validator};
