use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::errors::{Result, WaitError};
use crate::poll::{self, Outcome, Probe, Timing};
use crate::port::Port;
use crate::target::StrategyTarget;

/// Waits until `GET http://<host>:<mapped port><path>` answers with the
/// expected status, and optionally a body containing `body_contains`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStrategy {
    port: Port,
    path: String,
    status: StatusCode,
    body_contains: Option<String>,
    timing: Timing,
}

#[derive(Debug, Clone)]
pub struct HttpStrategyBuilder {
    port: Port,
    path: String,
    status: StatusCode,
    body_contains: Option<String>,
    timing: Timing,
}

impl HttpStrategyBuilder {
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn body_contains(mut self, expect: impl Into<String>) -> Self {
        self.body_contains = Some(expect.into());
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

    pub fn build(self) -> Result<HttpStrategy> {
        if let Port::Udp(_) = self.port {
            return Err(WaitError::InvalidConfig(format!(
                "cannot send http requests to {}",
                self.port
            )));
        }
        if !self.path.starts_with('/') {
            return Err(WaitError::InvalidConfig(format!(
                "http path '{}' must start with '/'",
                self.path
            )));
        }
        self.timing.validate()?;

        Ok(HttpStrategy {
            port: self.port,
            path: self.path,
            status: self.status,
            body_contains: self.body_contains,
            timing: self.timing,
        })
    }
}

impl HttpStrategy {
    pub fn builder(port: Port) -> HttpStrategyBuilder {
        HttpStrategyBuilder {
            port,
            path: "/".to_string(),
            status: StatusCode::OK,
            body_contains: None,
            timing: Timing::default(),
        }
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    #[instrument(skip(self, cancel, target), fields(port = %self.port, path = %self.path))]
    pub async fn wait_until_ready(
        &self,
        cancel: &CancellationToken,
        target: &dyn StrategyTarget,
    ) -> Result<()> {
        let client = Client::builder()
            .no_proxy()
            .build()
            .map_err(|err| WaitError::InvalidConfig(err.to_string()))?;

        match poll::until_ready(cancel, self.timing, || self.probe(&client, target)).await? {
            Outcome::Satisfied => {
                info!("http endpoint ready");
                Ok(())
            }
            Outcome::Expired(last) => Err(WaitError::ProbeDeadlineExceeded {
                probe: format!("http endpoint {}{}", self.port, self.path),
                last: last.unwrap_or_else(|| "none".to_string()),
                timeout: self.timing.startup_timeout,
            }),
        }
    }

    async fn probe(&self, client: &Client, target: &dyn StrategyTarget) -> Result<Probe<String>> {
        let host = target
            .host()
            .await
            .map_err(|source| WaitError::Target { source })?;
        let mapped = target
            .mapped_port(self.port)
            .await
            .map_err(|source| WaitError::Target { source })?;
        let url = format!("http://{host}:{}{}", mapped.number(), self.path);

        let response = match client.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(%url, error = %err, "http request failed");
                return Ok(Probe::Pending(err.to_string()));
            }
        };

        let status = response.status();
        if status != self.status {
            debug!(%url, %status, "unexpected http status");
            return Ok(Probe::Pending(format!("status {status}")));
        }

        let Some(expect) = &self.body_contains else {
            return Ok(Probe::Ready);
        };

        match response.text().await {
            Ok(text) if text.contains(expect.as_str()) => Ok(Probe::Ready),
            Ok(_) => Ok(Probe::Pending(format!("body without '{expect}'"))),
            Err(err) => Ok(Probe::Pending(err.to_string())),
        }
    }
}
