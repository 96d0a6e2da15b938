use std::fmt;
use std::str::FromStr;

use crate::errors::WaitError;

/// A container port in docker notation, e.g. `27017/tcp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Port {
    Tcp(u16),
    Udp(u16),
}

impl Port {
    pub fn number(&self) -> u16 {
        match self {
            Port::Tcp(port) | Port::Udp(port) => *port,
        }
    }
}

impl FromStr for Port {
    type Err = WaitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || WaitError::InvalidConfig(format!("malformed port binding: {s}"));

        let Some((port, protocol)) = s.split_once('/') else {
            return Err(malformed());
        };

        let port = port.parse::<u16>().map_err(|_| malformed())?;
        match protocol {
            "tcp" => Ok(Port::Tcp(port)),
            "udp" => Ok(Port::Udp(port)),
            _ => Err(malformed()),
        }
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Tcp(port) => write!(f, "{port}/tcp"),
            Port::Udp(port) => write!(f, "{port}/udp"),
        }
    }
}
