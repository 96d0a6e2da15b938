use std::time::Duration;

use thiserror::Error;

/// Error type returned by a [`StrategyTarget`](crate::StrategyTarget).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T> = std::result::Result<T, WaitError>;

#[derive(Debug, Error)]
pub enum WaitError {
    #[error("Log stream unavailable: {source}")]
    Stream { source: BoxError },

    #[error("Strategy target error: {source}")]
    Target { source: BoxError },

    #[error(
        "Log pattern '{pattern}' seen {observed} time(s), expected {expected}, \
         before the {timeout:?} deadline"
    )]
    DeadlineExceeded {
        pattern: String,
        observed: usize,
        expected: usize,
        timeout: Duration,
    },

    #[error("{probe} not ready before the {timeout:?} deadline (last attempt: {last})")]
    ProbeDeadlineExceeded {
        probe: String,
        last: String,
        timeout: Duration,
    },

    #[error("Wait cancelled by caller")]
    Cancelled,

    #[error("Invalid wait strategy: {0}")]
    InvalidConfig(String),
}
