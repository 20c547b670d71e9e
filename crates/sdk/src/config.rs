//! Client configuration

use crate::error::{ApiError, Result};
use std::fmt;
use std::time::Duration;

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable names read by [`ClientConfig::from_env`]
pub mod env {
    pub const URL: &str = "ZABBIX_URL";
    pub const USER: &str = "ZABBIX_USER";
    pub const PASSWORD: &str = "ZABBIX_PASSWORD";
    pub const TIMEOUT_SECS: &str = "ZABBIX_TIMEOUT_SECS";
}

/// Connection parameters for [`crate::ApiClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Frontend base URL, e.g. `https://example.org/zabbix`
    pub endpoint: String,
    pub user: String,
    pub password: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(
        endpoint: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            user: user.into(),
            password: password.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration from `ZABBIX_*` environment variables
    ///
    /// `ZABBIX_URL`, `ZABBIX_USER` and `ZABBIX_PASSWORD` are required.
    /// `ZABBIX_TIMEOUT_SECS` is optional and defaults to 10.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| ApiError::Config(format!("{} is not set", key)))
        };

        let config = Self::new(
            required(env::URL)?,
            required(env::USER)?,
            required(env::PASSWORD)?,
        );

        match lookup(env::TIMEOUT_SECS) {
            Some(raw) => Ok(config.with_timeout(parse_timeout(&raw)?)),
            None => Ok(config),
        }
    }

    /// Full URL of the JSON-RPC entry point
    pub fn api_url(&self) -> String {
        format!("{}/api_jsonrpc.php", self.endpoint.trim_end_matches('/'))
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ApiError::Config(format!(
            "{} must be a positive number of seconds, got {:?}",
            env::TIMEOUT_SECS,
            raw
        ))),
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
