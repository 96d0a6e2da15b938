use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::errors::{Result, WaitError};
use crate::poll::{self, Outcome, Probe, Timing};
use crate::scan::scan;
use crate::target::StrategyTarget;

/// Waits until `pattern` shows up at least `occurrence` times in the
/// container logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStrategy {
    pattern: String,
    occurrence: usize,
    timing: Timing,
}

#[derive(Debug, Clone)]
pub struct LogStrategyBuilder {
    pattern: String,
    occurrence: usize,
    timing: Timing,
}

impl LogStrategyBuilder {
    /// Number of times the pattern must be found, defaults to 1.
    pub fn occurrence(mut self, occurrence: usize) -> Self {
        self.occurrence = occurrence;
        self
    }

    pub fn startup_timeout(mut self, timeout: Duration) -> Self {
        self.timing.startup_timeout = timeout;
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.timing.poll_interval = interval;
        self
    }

    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn build(self) -> Result<LogStrategy> {
        if self.pattern.is_empty() {
            return Err(WaitError::InvalidConfig(
                "log pattern must not be empty".to_string(),
            ));
        }
        if self.occurrence == 0 {
            return Err(WaitError::InvalidConfig(
                "log pattern occurrence must be at least 1".to_string(),
            ));
        }
        self.timing.validate()?;

        Ok(LogStrategy {
            pattern: self.pattern,
            occurrence: self.occurrence,
            timing: self.timing,
        })
    }
}

impl LogStrategy {
    pub fn builder(pattern: impl Into<String>) -> LogStrategyBuilder {
        LogStrategyBuilder {
            pattern: pattern.into(),
            occurrence: 1,
            timing: Timing::default(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn occurrence(&self) -> usize {
        self.occurrence
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    #[instrument(skip(self, cancel, target), fields(pattern = %self.pattern, occurrence = self.occurrence))]
    pub async fn wait_until_ready(
        &self,
        cancel: &CancellationToken,
        target: &dyn StrategyTarget,
    ) -> Result<()> {
        match poll::until_ready(cancel, self.timing, || self.probe(target)).await? {
            Outcome::Satisfied => {
                info!("log pattern found");
                Ok(())
            }
            Outcome::Expired(observed) => Err(WaitError::DeadlineExceeded {
                pattern: self.pattern.clone(),
                observed: observed.unwrap_or(0),
                expected: self.occurrence,
                timeout: self.timing.startup_timeout,
            }),
        }
    }

    async fn probe(&self, target: &dyn StrategyTarget) -> Result<Probe<usize>> {
        let stream = target
            .logs()
            .await
            .map_err(|source| WaitError::Stream { source })?;

        let count = scan(stream, self.pattern.as_bytes())
            .await
            .map_err(|err| WaitError::Stream {
                source: Box::new(err),
            })?;

        debug!(count, "scanned container logs");
        if count >= self.occurrence {
            Ok(Probe::Ready)
        } else {
            Ok(Probe::Pending(count))
        }
    }
}
