use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, timeout_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::errors::WaitError;
use crate::{DEFAULT_POLL_INTERVAL, DEFAULT_STARTUP_TIMEOUT};

/// How long a strategy keeps polling, and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub startup_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            startup_timeout: DEFAULT_STARTUP_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Timing {
    pub(crate) fn validate(&self) -> Result<(), WaitError> {
        if self.startup_timeout.is_zero() {
            return Err(WaitError::InvalidConfig(
                "startup timeout must be greater than zero".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(WaitError::InvalidConfig(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a single readiness probe.
pub(crate) enum Probe<T> {
    Ready,
    /// Not ready yet, with what was observed for diagnostics.
    Pending(T),
}

pub(crate) enum Outcome<T> {
    Satisfied,
    /// Deadline reached, with the last observation if any probe completed.
    Expired(Option<T>),
}

/// Runs `probe` until it reports ready, the startup timeout elapses or
/// `cancel` fires.
///
/// The probe and the pause between two probes both race the cancellation
/// token, and a probe still running at the deadline is dropped.
pub(crate) async fn until_ready<T, F, Fut>(
    cancel: &CancellationToken,
    timing: Timing,
    mut probe: F,
) -> Result<Outcome<T>, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Probe<T>, WaitError>>,
{
    let deadline = Instant::now() + timing.startup_timeout;
    let mut last = None;

    loop {
        if cancel.is_cancelled() {
            return Err(WaitError::Cancelled);
        }

        let attempt = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WaitError::Cancelled),
            attempt = timeout_at(deadline, probe()) => attempt,
        };

        match attempt {
            Ok(Ok(Probe::Ready)) => return Ok(Outcome::Satisfied),
            Ok(Ok(Probe::Pending(observed))) => last = Some(observed),
            Ok(Err(err)) => return Err(err),
            Err(_) => return Ok(Outcome::Expired(last)),
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(Outcome::Expired(last));
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(WaitError::Cancelled),
            _ = sleep(timing.poll_interval.min(deadline - now)) => {}
        }
    }
}
