//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_STORAGE_DIR` - Directory holding durable storage (default: .shopfront)
//! - `SHOPFRONT_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! - `SHOPFRONT_CURRENCY` - Display currency code (default: INR)

use std::path::PathBuf;
use std::str::FromStr;

use shopfront_core::CurrencyCode;
use thiserror::Error;

const DEFAULT_STORAGE_DIR: &str = ".shopfront";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for file-backed storage
    pub storage_dir: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Currency prices are shown in
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            log_format: LogFormat::default(),
            currency: CurrencyCode::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = PathBuf::from(get_env_or_default(
            &lookup,
            "SHOPFRONT_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));

        let log_format = get_env_or_default(&lookup, "SHOPFRONT_LOG_FORMAT", "pretty")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPFRONT_LOG_FORMAT".to_string(), e))?;

        let currency = match get_optional_env(&lookup, "SHOPFRONT_CURRENCY") {
            Some(value) => parse_currency(&value)?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            storage_dir,
            log_format,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable from `lookup`.
fn get_optional_env(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
}

/// Get a variable from `lookup` with a default value.
fn get_env_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> String {
    get_optional_env(lookup, key).unwrap_or_else(|| default.to_string())
}

fn parse_currency(value: &str) -> Result<CurrencyCode, ConfigError> {
    match value.trim().to_ascii_uppercase().as_str() {
        "INR" => Ok(CurrencyCode::INR),
        "USD" => Ok(CurrencyCode::USD),
        "EUR" => Ok(CurrencyCode::EUR),
        "GBP" => Ok(CurrencyCode::GBP),
        other => Err(ConfigError::InvalidEnvVar(
            "SHOPFRONT_CURRENCY".to_string(),
            format!("unsupported currency '{other}'"),
        )),
    }
}
