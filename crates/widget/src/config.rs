//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TILLPOINT_BACKEND_URL` - Base URL of the sales backend
//!
//! ## Optional
//! - `TILLPOINT_CURRENCY_SYMBOL` - Currency prefix for displayed amounts
//!   (default: ₹)
//! - `TILLPOINT_REQUEST_TIMEOUT_SECS` - Timeout applied to backend requests;
//!   unset means requests wait until the backend answers

use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid backend URL {0}: {1}")]
    InvalidBackendUrl(String, String),
}

/// Cart widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// Base URL of the sales backend, without a trailing slash.
    pub backend_url: String,
    /// Currency prefix for displayed amounts.
    pub currency_symbol: String,
    /// Timeout for backend requests. The checkout control stays disabled
    /// until the request settles whether or not a timeout is set.
    pub request_timeout: Option<Duration>,
}

impl WidgetConfig {
    /// Create a configuration for the given backend, with defaults for the
    /// rest.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is not a valid http(s) URL.
    pub fn new(backend_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            currency_symbol: "₹".to_string(),
            request_timeout: None,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = parse_backend_url(&get_required_env("TILLPOINT_BACKEND_URL")?)?;
        let currency_symbol = get_env_or_default("TILLPOINT_CURRENCY_SYMBOL", "₹");
        let request_timeout = get_optional_env("TILLPOINT_REQUEST_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "TILLPOINT_REQUEST_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            backend_url,
            currency_symbol,
            request_timeout,
        })
    }
}

/// Validate the backend URL and normalize away any trailing slash.
fn parse_backend_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidBackendUrl(raw.to_string(), e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidBackendUrl(
            raw.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
