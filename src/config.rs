//! Runtime configuration for the gate transport. Values are read from the
//! environment so deployments can point the client at another gate without
//! rebuilding. Configuration values are public; do not store secrets here.

use std::time::Duration;

const GATE_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const GATE_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_USER_AGENT: &str = concat!("gate-client/", env!("CARGO_PKG_VERSION"));

/// Transport configuration for the access gate client.
#[derive(Clone, Debug)]
pub struct GateConfig {
    pub base_url: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl GateConfig {
    /// Builds a config for the given gate base URL with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: GATE_CONNECT_TIMEOUT,
            request_timeout: GATE_REQUEST_TIMEOUT,
        }
    }

    /// Loads the config from `GATE_API_BASE_URL` and `GATE_USER_AGENT`,
    /// ignoring unset or blank values.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::new("");

        if let Some(value) = read_env_value("GATE_API_BASE_URL") {
            config.base_url = value;
        }
        if let Some(value) = read_env_value("GATE_USER_AGENT") {
            config.user_agent = value;
        }

        config
    }
}

fn read_env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .and_then(|value| normalize_env_value(&value))
}

fn normalize_env_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
