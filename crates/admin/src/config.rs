//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREDECK_API_URL` - Store API origin (default: `https://fakestoreapi.com`)
//! - `STOREDECK_SESSION_FILE` - Where the login session is kept (default: `.storedeck-session.json`)
//! - `STOREDECK_USER_AGENT` - `User-Agent` sent with every request (default: `storedeck/<version>`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate, 0.0 to 1.0 (default: 1.0)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default store API origin.
pub const DEFAULT_API_URL: &str = "https://fakestoreapi.com";

/// Default location of the persisted login session.
pub const DEFAULT_SESSION_FILE: &str = ".storedeck-session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Complete dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Store API connection settings
    pub api: ApiConfig,
    /// Path of the persisted session (token + username)
    pub session_file: PathBuf,
    /// Sentry error tracking (optional)
    pub sentry: Option<SentryConfig>,
}

/// Store API connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin every request path is appended to
    pub base_url: Url,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl ApiConfig {
    /// Settings for the given origin with the default user agent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("STOREDECK_API_URL", base_url)?,
            user_agent: default_user_agent(),
        })
    }
}

/// Sentry error tracking configuration.
#[derive(Clone)]
pub struct SentryConfig {
    /// Sentry DSN (contains the project key)
    pub dsn: String,
    /// Sentry environment (e.g., "development", "production")
    pub environment: Option<String>,
    /// Error sample rate (0.0 to 1.0)
    pub sample_rate: f32,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .finish()
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid. Every
    /// variable is optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("STOREDECK_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = parse_base_url("STOREDECK_API_URL", &base_url)?;
        let user_agent = lookup("STOREDECK_USER_AGENT").unwrap_or_else(default_user_agent);
        let session_file = lookup("STOREDECK_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let sentry = lookup("SENTRY_DSN")
            .filter(|dsn| !dsn.trim().is_empty())
            .map(|dsn| -> Result<SentryConfig, ConfigError> {
                let sample_rate = match lookup("SENTRY_SAMPLE_RATE") {
                    Some(raw) => parse_sample_rate(&raw)?,
                    None => 1.0,
                };
                Ok(SentryConfig {
                    dsn,
                    environment: lookup("SENTRY_ENVIRONMENT"),
                    sample_rate,
                })
            })
            .transpose()?;

        Ok(Self {
            api: ApiConfig {
                base_url,
                user_agent,
            },
            session_file,
            sentry,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn default_user_agent() -> String {
    format!("storedeck/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse an http(s) origin.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{other}', expected http or https"),
        )),
    }
}

fn parse_sample_rate(raw: &str) -> Result<f32, ConfigError> {
    let rate = raw
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string()))?;

    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            "SENTRY_SAMPLE_RATE".to_string(),
            format!("{rate} is outside 0.0..=1.0"),
        ))
    }
}
