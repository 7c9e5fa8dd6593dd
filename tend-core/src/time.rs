//! Epoch-seconds time helpers.
//!
//! All timestamps in Tend are unix epoch seconds (`i64`). Components take
//! `now` as an explicit argument so scoring and scheduling are reproducible
//! in tests; this module only supplies the wall-clock entry point.

use std::time::{SystemTime, UNIX_EPOCH};

pub const SECS_PER_DAY: i64 = 86_400;

/// Current wall-clock time as unix epoch seconds.
pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Whole days elapsed between `earlier` and `now`. Negative spans clamp to 0.
pub fn days_between(earlier: i64, now: i64) -> i64 {
    ((now - earlier) / SECS_PER_DAY).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_between_whole_days() {
        assert_eq!(days_between(0, 3 * SECS_PER_DAY), 3);
        assert_eq!(days_between(0, 3 * SECS_PER_DAY + 100), 3);
    }

    #[test]
    fn test_days_between_clamps_future() {
        assert_eq!(days_between(10 * SECS_PER_DAY, 0), 0);
    }
}
