use tokio_util::sync::CancellationToken;

use crate::errors::Result;
use crate::http::HttpStrategy;
use crate::listening::ListeningPortStrategy;
use crate::log::LogStrategy;
use crate::poll::Timing;
use crate::target::StrategyTarget;

/// A condition to meet before a container is considered ready
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Waits for a pattern in the container logs
    Log(LogStrategy),
    /// Waits for a published tcp port to accept connections
    ListeningPort(ListeningPortStrategy),
    /// Waits for an http endpoint to answer as expected
    Http(HttpStrategy),
}

impl WaitStrategy {
    pub async fn wait_until_ready(
        &self,
        cancel: &CancellationToken,
        target: &dyn StrategyTarget,
    ) -> Result<()> {
        match self {
            WaitStrategy::Log(strategy) => strategy.wait_until_ready(cancel, target).await,
            WaitStrategy::ListeningPort(strategy) => {
                strategy.wait_until_ready(cancel, target).await
            }
            WaitStrategy::Http(strategy) => strategy.wait_until_ready(cancel, target).await,
        }
    }

    pub fn timing(&self) -> Timing {
        match self {
            WaitStrategy::Log(strategy) => strategy.timing(),
            WaitStrategy::ListeningPort(strategy) => strategy.timing(),
            WaitStrategy::Http(strategy) => strategy.timing(),
        }
    }
}

impl From<LogStrategy> for WaitStrategy {
    fn from(strategy: LogStrategy) -> Self {
        WaitStrategy::Log(strategy)
    }
}

impl From<ListeningPortStrategy> for WaitStrategy {
    fn from(strategy: ListeningPortStrategy) -> Self {
        WaitStrategy::ListeningPort(strategy)
    }
}

impl From<HttpStrategy> for WaitStrategy {
    fn from(strategy: HttpStrategy) -> Self {
        WaitStrategy::Http(strategy)
    }
}
