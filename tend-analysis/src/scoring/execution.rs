//! Execution sub-health: success rate with recency and repeat-failure caps.

use tend_core::config::HealthConfig;
use tend_core::time::days_between;
use tend_core::types::ExecutionHistory;

/// Score execution history on [0, 100].
///
/// Zero recorded attempts is neutral, not a failure — "not yet exercised"
/// must not drag an otherwise healthy artifact down. With attempts, the
/// success rate carries the score, recent failures subtract, and hitting
/// the auto-flag failure threshold caps the score at 30.
pub fn score(history: &ExecutionHistory, config: &HealthConfig, now: i64) -> f64 {
    if history.total_attempts == 0 {
        return config.neutral_execution_score;
    }

    let mut score = history.success_rate() * 100.0;

    if let Some(last_failure) = history.last_failure {
        let days = days_between(last_failure, now);
        if days < 7 {
            score -= 20.0;
        } else if days < 30 {
            score -= 10.0;
        }
    }

    if history.failed_runs >= config.auto_flag_broken_after_failures {
        score = score.min(30.0);
    }

    score.clamp(0.0, 100.0)
}
