//! Client configuration parsed from environment variables.

use crate::error::GardenError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GardenConfig {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    /// Bearer token sent with every request, if any.
    pub auth_token: Option<String>,
    pub timeouts: Timeouts,
}

impl GardenConfig {
    /// Config pointing at `api_url` with no token and default timeouts.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the URL is blank.
    pub fn new(api_url: &str) -> Result<Self, GardenError> {
        Ok(Self { api_url: normalize_url(api_url)?, auth_token: None, timeouts: Timeouts::default() })
    }

    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `GARDEN_API_URL`: default `http://localhost:8000`
    /// - `GARDEN_AUTH_TOKEN`: bearer token; blank means none
    /// - `GARDEN_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GARDEN_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns `Config` if `GARDEN_API_URL` is set but blank.
    pub fn from_env() -> Result<Self, GardenError> {
        let api_url = normalize_url(&std::env::var("GARDEN_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()))?;
        let auth_token = std::env::var("GARDEN_AUTH_TOKEN")
            .into_iter()
            .map(|token| token.trim().to_string())
            .find(|token| !token.is_empty());
        let timeouts = Timeouts {
            request_secs: env_parse_u64("GARDEN_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("GARDEN_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { api_url, auth_token, timeouts })
    }

    /// Replace the base URL, keeping token and timeouts.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the URL is blank.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, GardenError> {
        self.api_url = normalize_url(api_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

fn normalize_url(raw: &str) -> Result<String, GardenError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(GardenError::Config("GARDEN_API_URL is empty".into()));
    }
    Ok(trimmed.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key).map(|v| v.trim().parse::<u64>()) {
        Ok(Ok(value)) if value > 0 => value,
        _ => default,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
