//! Storefront configuration module.
//!
//! Configuration is loaded from environment variables (after `.env`, when
//! present) with fallback to defaults.

use emporio_core::DEFAULT_WHATSAPP_NUMBER;
use emporio_db::{DbConfig, RetryPolicy};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default model for the SEO text flow.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// sqlx SQLite connection URL
    pub database_url: String,

    /// Pool size
    pub db_max_connections: u32,

    /// Store number for WhatsApp links
    pub whatsapp_number: String,

    /// Category cache lifetime; zero disables the cache
    pub category_cache_ttl: Duration,

    /// Attempts for the category lookup
    pub category_retry_attempts: u32,

    /// Fixed delay between category lookup attempts
    pub category_retry_delay: Duration,

    /// Generative text API key; SEO falls back to defaults without it
    pub gemini_api_key: Option<String>,

    pub gemini_model: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` wins over `DB_PATH`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let path = get("DB_PATH").unwrap_or_else(|| "./emporio.db".to_string());
                format!("sqlite://{}?mode=rwc", path)
            }
        };

        let config = StorefrontConfig {
            http_port: parse_or(&get, "HTTP_PORT", 3000)?,
            database_url,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            whatsapp_number: get("WHATSAPP_NUMBER")
                .unwrap_or_else(|| DEFAULT_WHATSAPP_NUMBER.to_string()),
            category_cache_ttl: Duration::from_secs(parse_or(&get, "CATEGORY_CACHE_TTL_SECS", 300)?),
            category_retry_attempts: parse_or(&get, "CATEGORY_RETRY_ATTEMPTS", 3)?,
            category_retry_delay: Duration::from_millis(parse_or(
                &get,
                "CATEGORY_RETRY_DELAY_MS",
                2000,
            )?),
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if config.category_retry_attempts == 0 {
            return Err(ConfigError::InvalidValue("CATEGORY_RETRY_ATTEMPTS".to_string()));
        }
        if config.whatsapp_number.chars().all(|c| !c.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue("WHATSAPP_NUMBER".to_string()));
        }

        Ok(config)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::from_url(self.database_url.clone()).max_connections(self.db_max_connections)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(self.category_retry_attempts, self.category_retry_delay)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
