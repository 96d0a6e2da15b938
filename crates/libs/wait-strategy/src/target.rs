use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::errors::BoxError;
use crate::port::Port;

/// Snapshot of a container's output, read to the end by the log strategy.
pub type LogStream = Pin<Box<dyn AsyncRead + Send>>;

/// What a started container has to expose so its readiness can be probed.
///
/// Strategies only ever read through this trait. A new [`LogStream`] is
/// requested on every poll, so implementations must hand out the whole log
/// produced so far each time rather than resuming from a previous read.
#[async_trait]
pub trait StrategyTarget: Send + Sync {
    async fn host(&self) -> Result<String, BoxError>;

    /// Host side port published for the container side `port`.
    async fn mapped_port(&self, port: Port) -> Result<Port, BoxError>;

    async fn logs(&self) -> Result<LogStream, BoxError>;
}
