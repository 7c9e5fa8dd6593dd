//! HistoryProvider trait — externally sourced execution history.

use rustc_hash::FxHashMap;

use crate::types::ExecutionHistory;

/// Source of per-artifact execution history. The executor that actually
/// runs artifacts lives outside the core; this is its read interface.
pub trait HistoryProvider: Send + Sync {
    fn history(&self, artifact_id: &str) -> Option<ExecutionHistory>;
}

/// Default provider: no artifact has ever been exercised.
pub struct NoHistory;

impl HistoryProvider for NoHistory {
    fn history(&self, _artifact_id: &str) -> Option<ExecutionHistory> {
        None
    }
}

/// In-memory provider over a fixed map, for standalone runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticHistory {
    histories: FxHashMap<String, ExecutionHistory>,
}

impl StaticHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, artifact_id: impl Into<String>, history: ExecutionHistory) {
        self.histories.insert(artifact_id.into(), history);
    }
}

impl HistoryProvider for StaticHistory {
    fn history(&self, artifact_id: &str) -> Option<ExecutionHistory> {
        self.histories.get(artifact_id).cloned()
    }
}
