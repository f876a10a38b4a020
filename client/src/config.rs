//! Configuration management for the POS back-office client
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with POS_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use shared::types::Language;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Remote API configuration
    pub api: ApiConfig,

    /// Session handling configuration
    pub session: SessionConfig,

    /// Time-clock geofence configuration
    pub geofence: GeofenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the remote POS API
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Language sent with requests and preferred for messages
    pub language: Language,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Clock-skew leeway applied to the advisory expiry check, in seconds
    pub expiry_leeway_secs: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeofenceConfig {
    /// Radius applied when a work site does not define its own
    pub default_radius_m: f64,

    /// Turn off to allow punches from anywhere (testing branches)
    pub enforce: bool,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var("POS_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("api.base_url", "http://localhost:8080/api/v1")?
            .set_default("api.timeout_secs", 15)?
            .set_default("api.language", "thai")?
            .set_default("session.expiry_leeway_secs", 0)?
            .set_default("geofence.default_radius_m", 150.0)?
            .set_default("geofence.enforce", true)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (POS_ prefix)
            .add_source(
                Environment::with_prefix("POS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            timeout_secs: 15,
            language: Language::Thai,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_leeway_secs: 0,
        }
    }
}

impl Default for GeofenceConfig {
    fn default() -> Self {
        Self {
            default_radius_m: 150.0,
            enforce: true,
        }
    }
}
