//! Readiness checks for freshly started containers.
//!
//! A strategy polls a [`StrategyTarget`] until its condition holds, the
//! startup timeout elapses, or the caller cancels through a
//! [`CancellationToken`](tokio_util::sync::CancellationToken):
//!
//! ```no_run
//! # async fn run(target: &dyn wait_strategy::StrategyTarget) -> wait_strategy::Result<()> {
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use wait_strategy::LogStrategy;
//!
//! let strategy = LogStrategy::builder("waiting for connections")
//!     .startup_timeout(Duration::from_secs(30))
//!     .build()?;
//! strategy.wait_until_ready(&CancellationToken::new(), target).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

mod errors;
mod http;
mod listening;
mod log;
mod poll;
mod port;
mod scan;
mod settings;
mod strategy;
mod target;

#[cfg(test)]
mod testing;

pub use errors::{BoxError, Result, WaitError};
pub use http::{HttpStrategy, HttpStrategyBuilder};
pub use listening::{ListeningPortStrategy, ListeningPortStrategyBuilder};
pub use log::{LogStrategy, LogStrategyBuilder};
pub use poll::Timing;
pub use port::Port;
pub use scan::{count_occurrences, scan};
pub use settings::WaitSettings;
pub use strategy::WaitStrategy;
pub use target::{LogStream, StrategyTarget};

/// Startup timeout used when a strategy does not set one.
pub const DEFAULT_STARTUP_TIMEOUT: Duration = Duration::from_secs(60);

/// Pause between two probes used when a strategy does not set one.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5);
