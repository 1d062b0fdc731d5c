//! Application configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use crate::session::MIN_LOGIN_DELAY;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_STORAGE_PATH: &str = ".radicais-livres/storage.json";
pub const DEFAULT_SAMPLE_DELAY_MS: u64 = 1000;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the dashboard API; no trailing slash.
    pub api_base_url: String,
    /// File backing durable session storage.
    pub storage_path: PathBuf,
    /// Login latency; never below `MIN_LOGIN_DELAY`.
    pub login_delay: Duration,
    /// Simulated load time of the sample-data pages.
    pub sample_delay: Duration,
    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            login_delay: MIN_LOGIN_DELAY,
            sample_delay: Duration::from_millis(DEFAULT_SAMPLE_DELAY_MS),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `RL_API_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `RL_STORAGE_PATH`: default `.radicais-livres/storage.json`
    /// - `RL_LOGIN_DELAY_MS`: default 1000, values below 1000 are raised to it
    /// - `RL_SAMPLE_DELAY_MS`: default 1000
    /// - `RL_LOG`: log filter, falling back to `RUST_LOG`, then `info`
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url =
            normalize_base_url(&std::env::var("RL_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()))?;
        let storage_path = std::env::var("RL_STORAGE_PATH").map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        let login_delay = Duration::from_millis(env_parse_u64("RL_LOGIN_DELAY_MS", 0)).max(MIN_LOGIN_DELAY);
        let sample_delay = Duration::from_millis(env_parse_u64("RL_SAMPLE_DELAY_MS", DEFAULT_SAMPLE_DELAY_MS));
        let log_filter = std::env::var("RL_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

        Ok(Self { api_base_url, storage_path, login_delay, sample_delay, log_filter })
    }

    /// Apply command-line overrides on top of the environment values.
    ///
    /// # Errors
    ///
    /// Returns an error if an overriding base URL is invalid.
    pub fn with_overrides(mut self, api_base_url: Option<&str>, storage_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(url) = api_base_url {
            self.api_base_url = normalize_base_url(url)?;
        }
        if let Some(path) = storage_path {
            self.storage_path = path;
        }
        Ok(self)
    }
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var: "RL_API_BASE_URL",
            message: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(trimmed.to_owned())
}
