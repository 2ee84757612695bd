//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://digiwallet2.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const TOKEN_DIR: &str = ".digiwallet";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Backend origin without a trailing slash.
    pub base_url: String,
    /// File holding the persisted bearer token.
    pub token_path: PathBuf,
    pub timeouts: ApiTimeouts,
}

impl WalletConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `WALLET_API_BASE_URL`: backend origin (default `https://digiwallet2.onrender.com`)
    /// - `WALLET_TOKEN_PATH`: token file (default `$HOME/.digiwallet/token`)
    /// - `WALLET_REQUEST_TIMEOUT_SECS`: default 30
    /// - `WALLET_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an http(s) URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(lookup("WALLET_API_BASE_URL").as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let token_path = lookup("WALLET_TOKEN_PATH")
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| default_token_path(lookup("HOME")), PathBuf::from);
        let timeouts = ApiTimeouts {
            request_secs: parse_u64(lookup("WALLET_REQUEST_TIMEOUT_SECS"), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup("WALLET_CONNECT_TIMEOUT_SECS"), DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, token_path, timeouts })
    }

    /// Same config pointed at another backend origin.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an http(s) URL.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }
}

/// Trim whitespace and trailing slashes, rejecting non-http(s) schemes.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] for anything but `http://` or `https://`.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = ["http://", "https://"]
        .iter()
        .any(|scheme| trimmed.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
    if !has_host {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn default_token_path(home: Option<String>) -> PathBuf {
    let base = home.filter(|h| !h.is_empty()).map(PathBuf::from).unwrap_or_default();
    base.join(TOKEN_DIR).join(crate::state::storage::TOKEN_KEY)
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}
