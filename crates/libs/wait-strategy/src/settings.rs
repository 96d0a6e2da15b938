use std::time::Duration;

use fixture_config::{deserialize_duration, FixtureConfig};
use serde::Deserialize;

use crate::poll::Timing;

const DEFAULTS: &str = r#"
[wait]
startup_timeout = 60000
poll_interval = 5
"#;

/// Wait timings read from `wait.toml`, `CANNED__WAIT__*` variables and
/// overrides, e.g. `startup_timeout=120000`.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitSettings {
    /// Startup timeout in milliseconds.
    #[serde(deserialize_with = "deserialize_duration")]
    pub startup_timeout: Duration,
    /// Pause between two probes in milliseconds.
    #[serde(deserialize_with = "deserialize_duration")]
    pub poll_interval: Duration,
}

impl FixtureConfig<'_> for WaitSettings {
    const ENV_PREFIX: &'static str = "CANNED";
    const DEFAULTS: &'static str = DEFAULTS;

    fn file_sources() -> Vec<&'static str> {
        vec!["wait.toml"]
    }

    fn root_key() -> Option<&'static str> {
        Some("wait")
    }
}

impl From<WaitSettings> for Timing {
    fn from(settings: WaitSettings) -> Self {
        Timing {
            startup_timeout: settings.startup_timeout,
            poll_interval: settings.poll_interval,
        }
    }
}
