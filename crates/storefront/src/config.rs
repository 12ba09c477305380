//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run the shop against the public
//! demo catalog with a store file under `./data`.
//!
//! - `FOOTWA_DATA_DIR` - Directory holding the embedded store file
//!   (default: `./data`)
//! - `FOOTWA_CATALOG_URL` - Base URL of the remote catalog API
//!   (default: `https://dummyjson.com`)
//! - `FOOTWA_DISPLAY_RATE` - Fixed multiplier from catalog prices to the
//!   display currency (default: `80`)

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;

use footwa_core::DisplayRate;

/// Default base URL for the remote catalog API.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";

const DEFAULT_DATA_DIR: &str = "./data";

/// File name of the embedded store inside the data directory.
const STORE_FILE: &str = "footwa.redb";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding locally persisted state
    pub data_dir: PathBuf,
    /// Remote catalog API configuration
    pub catalog: CatalogConfig,
    /// Multiplier from catalog prices to the display currency
    pub display_rate: DisplayRate,
}

/// Remote catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (no trailing slash required)
    pub base_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("FOOTWA_DATA_DIR", DEFAULT_DATA_DIR));
        let base_url = get_env_or_default("FOOTWA_CATALOG_URL", DEFAULT_CATALOG_URL);
        let display_rate = match std::env::var("FOOTWA_DISPLAY_RATE") {
            Ok(raw) => parse_rate(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("FOOTWA_DISPLAY_RATE".to_owned(), e))?,
            Err(_) => DisplayRate::default(),
        };

        Ok(Self {
            data_dir,
            catalog: CatalogConfig { base_url },
            display_rate,
        })
    }

    /// Path of the embedded store file.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    /// Replace the data directory (CLI `--data-dir` flag).
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Replace the catalog base URL (CLI `--catalog-url` flag).
    #[must_use]
    pub fn with_catalog_url(mut self, base_url: impl Into<String>) -> Self {
        self.catalog.base_url = base_url.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a display-rate multiplier. Must be a positive decimal.
fn parse_rate(raw: &str) -> Result<DisplayRate, String> {
    let rate: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| format!("not a decimal number: {raw:?}"))?;
    if rate <= Decimal::ZERO {
        return Err(format!("must be positive, got {rate}"));
    }
    Ok(DisplayRate::new(rate))
}
