//! Revalidation schedule — the one entity with a multi-run lifecycle.

use serde::{Deserialize, Serialize};

use crate::time::SECS_PER_DAY;

/// Per-artifact revalidation schedule. Created once, mutated after every
/// revalidation, persisted as the mapping artifact_id → schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevalidationSchedule {
    pub artifact_id: String,
    /// Always ≥ 1.
    pub frequency_days: u32,
    #[serde(default)]
    pub last_run: Option<i64>,
    #[serde(default)]
    pub next_run: Option<i64>,
    #[serde(default)]
    pub run_count: u32,
    #[serde(default)]
    pub failure_count: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl RevalidationSchedule {
    pub fn new(artifact_id: impl Into<String>, frequency_days: u32, now: i64) -> Self {
        let frequency_days = frequency_days.max(1);
        Self {
            artifact_id: artifact_id.into(),
            frequency_days,
            last_run: None,
            next_run: Some(now + i64::from(frequency_days) * SECS_PER_DAY),
            run_count: 0,
            failure_count: 0,
            active: true,
        }
    }

    /// Whether this schedule is due at `now`. An unset next_run counts as
    /// due; inactive schedules never are.
    pub fn is_due(&self, now: i64) -> bool {
        self.active && self.next_run.map_or(true, |next| next <= now)
    }

    /// Record a completed run and reschedule: next_run is always derived
    /// from last_run + frequency, never left stale.
    pub fn mark_run(&mut self, now: i64, frequency_days: u32, failed: bool) {
        self.frequency_days = frequency_days.max(1);
        self.last_run = Some(now);
        self.next_run = Some(now + i64::from(self.frequency_days) * SECS_PER_DAY);
        self.run_count += 1;
        if failed {
            self.failure_count += 1;
        }
    }
}
