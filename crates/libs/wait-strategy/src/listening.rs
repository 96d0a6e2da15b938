use std::time::Duration;

use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::errors::{Result, WaitError};
use crate::poll::{self, Outcome, Probe, Timing};
use crate::port::Port;
use crate::target::StrategyTarget;

/// Waits until a TCP connection to the published side of `port` succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListeningPortStrategy {
    port: Port,
    timing: Timing,
}

#[derive(Debug, Clone)]
pub struct ListeningPortStrategyBuilder {
    port: Port,
    timing: Timing,
}

impl ListeningPortStrategyBuilder {
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

    pub fn build(self) -> Result<ListeningPortStrategy> {
        if let Port::Udp(_) = self.port {
            return Err(WaitError::InvalidConfig(format!(
                "cannot probe {} for a listener, only tcp ports can be",
                self.port
            )));
        }
        self.timing.validate()?;

        Ok(ListeningPortStrategy {
            port: self.port,
            timing: self.timing,
        })
    }
}

impl ListeningPortStrategy {
    pub fn builder(port: Port) -> ListeningPortStrategyBuilder {
        ListeningPortStrategyBuilder {
            port,
            timing: Timing::default(),
        }
    }

    pub fn port(&self) -> Port {
        self.port
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    #[instrument(skip(self, cancel, target), fields(port = %self.port))]
    pub async fn wait_until_ready(
        &self,
        cancel: &CancellationToken,
        target: &dyn StrategyTarget,
    ) -> Result<()> {
        match poll::until_ready(cancel, self.timing, || self.probe(target)).await? {
            Outcome::Satisfied => {
                info!("port is accepting connections");
                Ok(())
            }
            Outcome::Expired(last) => Err(WaitError::ProbeDeadlineExceeded {
                probe: format!("listening port {}", self.port),
                last: last.unwrap_or_else(|| "none".to_string()),
                timeout: self.timing.startup_timeout,
            }),
        }
    }

    async fn probe(&self, target: &dyn StrategyTarget) -> Result<Probe<String>> {
        let host = target
            .host()
            .await
            .map_err(|source| WaitError::Target { source })?;
        let mapped = target
            .mapped_port(self.port)
            .await
            .map_err(|source| WaitError::Target { source })?;

        match TcpStream::connect((host.as_str(), mapped.number())).await {
            Ok(_) => Ok(Probe::Ready),
            Err(err) => {
                debug!(%host, %mapped, error = %err, "port not accepting connections");
                Ok(Probe::Pending(err.to_string()))
            }
        }
    }
}
