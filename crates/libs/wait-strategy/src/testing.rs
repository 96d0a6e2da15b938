use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::BoxError;
use crate::port::Port;
use crate::target::{LogStream, StrategyTarget};

/// In-memory target whose log buffer can grow between two polls.
#[derive(Default)]
pub(crate) struct FakeTarget {
    host: String,
    logs: Mutex<Vec<u8>>,
    ports: HashMap<Port, Port>,
    broken_logs: bool,
}

impl FakeTarget {
    pub(crate) fn with_logs(logs: &[u8]) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            logs: Mutex::new(logs.to_vec()),
            ..Default::default()
        }
    }

    pub(crate) fn with_port(mut self, port: Port, mapped: Port) -> Self {
        self.ports.insert(port, mapped);
        self
    }

    pub(crate) fn with_broken_logs() -> Self {
        Self {
            broken_logs: true,
            ..Default::default()
        }
    }

    pub(crate) fn append(&self, line: &[u8]) {
        self.logs.lock().unwrap().extend_from_slice(line);
    }
}

#[async_trait]
impl StrategyTarget for FakeTarget {
    async fn host(&self) -> Result<String, BoxError> {
        Ok(self.host.clone())
    }

    async fn mapped_port(&self, port: Port) -> Result<Port, BoxError> {
        self.ports
            .get(&port)
            .copied()
            .ok_or_else(|| format!("port {port} is not published").into())
    }

    async fn logs(&self) -> Result<LogStream, BoxError> {
        if self.broken_logs {
            return Err(Box::new(io::Error::new(
                io::ErrorKind::NotFound,
                "no such container",
            )));
        }
        let snapshot = self.logs.lock().unwrap().clone();
        Ok(Box::pin(io::Cursor::new(snapshot)))
    }
}
