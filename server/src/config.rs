//! Server configuration parsed from environment variables.
//!
//! `main` loads `.env` through `dotenvy` before calling
//! [`ServerConfig::from_env`], so local development can keep overrides in a
//! file while deployments set real variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("http client: {0}")]
    HttpClient(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Backend REST API that `/api/*` is forwarded to. No trailing slash.
    pub api_base_url: String,
    pub api_timeout: Duration,
    /// Whether this server forwards `/api/*` itself. Disable when a reverse
    /// proxy in front of it already routes the API.
    pub proxy_api: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            proxy_api: true,
        }
    }
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `API_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `API_TIMEOUT_SECS`: default 30
    /// - `PROXY_API`: boolean, default true
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { var: "PORT", value: raw.clone() })?,
            None => defaults.port,
        };

        let api_base_url = match lookup("API_BASE_URL") {
            Some(raw) => parse_base_url("API_BASE_URL", &raw)?,
            None => defaults.api_base_url,
        };

        let api_timeout = match lookup("API_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::Invalid { var: "API_TIMEOUT_SECS", value: raw }),
            },
            None => defaults.api_timeout,
        };

        let proxy_api = match lookup("PROXY_API") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { var: "PROXY_API", value: raw })?,
            None => defaults.proxy_api,
        };

        Ok(Self { port, api_base_url, api_timeout, proxy_api })
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl { var, value: raw.to_owned() });
    }
    Ok(trimmed.to_owned())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
