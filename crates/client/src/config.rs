//! Client configuration resolved from the environment.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

pub const API_URL_ENV: &str = "MAILPANEL_API_URL";
pub const SESSION_FILE_ENV: &str = "MAILPANEL_SESSION_FILE";
pub const TOKEN_ENV: &str = "MAILPANEL_TOKEN";
pub const REQUEST_TIMEOUT_ENV: &str = "MAILPANEL_REQUEST_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    #[error("invalid {REQUEST_TIMEOUT_ENV} '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),

    #[error("failed to read .env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:8000/api`.
    pub api_base_url: String,
    /// Where the credential is persisted; `None` keeps it in memory only.
    pub session_file: Option<PathBuf>,
    /// Credential seed that overrides the stored one.
    pub token: Option<String>,
    /// `None` leaves timeouts to the transport and the server.
    pub request_timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base_url", &self.api_base_url)
            .field("session_file", &self.session_file)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
            token: None,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load `.env` (if present) and then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Err(dotenvy::Error::Io(_)) => {}
            Err(err) => return Err(err.into()),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_base_url = match get(API_URL_ENV) {
            Some(url) => normalize_base_url(&url)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let session_file = get(SESSION_FILE_ENV).map(PathBuf::from).or_else(default_session_file);

        let request_timeout = match get(REQUEST_TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => None,
        };

        Ok(Self {
            api_base_url,
            session_file,
            token: get(TOKEN_ENV),
            request_timeout,
        })
    }

    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(self)
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Keep the credential in memory only.
    pub fn without_session_file(mut self) -> Self {
        self.session_file = None;
        self
    }
}

/// `<data dir>/mailpanel/session.json`, when the platform has a data dir.
pub fn default_session_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("mailpanel").join("session.json"))
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ConfigError::InvalidUrl {
            value: raw.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
