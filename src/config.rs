// src/config.rs
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/api/anxiety-copilot";
pub const DEFAULT_USER_ID: &str = "demo";
pub const DEFAULT_THINKING_DELAY_MS: u64 = 250;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const ENV_ENDPOINT: &str = "COPILOT_ENDPOINT";
pub const ENV_USER_ID: &str = "COPILOT_USER_ID";
pub const ENV_THINKING_DELAY_MS: &str = "COPILOT_THINKING_DELAY_MS";
pub const ENV_TIMEOUT_MS: &str = "COPILOT_TIMEOUT_MS";

/// One deployment's view of the backend. The endpoint is the only place the
/// backend address lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: Url,
    pub user_id: String,
    pub thinking_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            user_id: DEFAULT_USER_ID.to_string(),
            thinking_delay: Duration::from_millis(DEFAULT_THINKING_DELAY_MS),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    /// Defaults pointed at another endpoint.
    pub fn for_endpoint(endpoint: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            endpoint: parse_endpoint(endpoint)?,
            ..Self::default()
        })
    }

    /// Reads the `COPILOT_*` variables, after loading a `.env` file if one
    /// exists. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with(|_| None)
    }

    /// Like [`ClientConfig::from_env`], with `overrides` taking precedence
    /// over the environment for any key it answers.
    pub fn from_env_with<F>(overrides: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| overrides(key).or_else(|| std::env::var(key).ok()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = parse_endpoint(&endpoint)?;
        }
        if let Some(user_id) = lookup(ENV_USER_ID).filter(|id| !id.trim().is_empty()) {
            config.user_id = user_id.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_THINKING_DELAY_MS) {
            config.thinking_delay = parse_millis(ENV_THINKING_DELAY_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.request_timeout = parse_millis(ENV_TIMEOUT_MS, &raw)?;
        }

        Ok(config)
    }
}

// DEFAULT_ENDPOINT is a literal checked by `defaults_match_local_backend`,
// so the parse cannot fail at runtime.
fn default_endpoint() -> Url {
    Url::parse(DEFAULT_ENDPOINT).unwrap_or_else(|_| unreachable!("DEFAULT_ENDPOINT parses"))
}

pub fn parse_endpoint(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(value.to_string())),
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: raw.to_string(),
        })
}
