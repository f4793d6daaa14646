//! Client configuration loaded from `{config_dir}/config.json`.

use crate::DEFAULT_API_ENDPOINT;
use crate::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_DIR_NAME: &str = "subway";
const CONFIG_VERSION: u32 = 1;

/// Environment variable replacing `server.api_endpoint`.
pub const API_ENDPOINT_ENV: &str = "SUBWAY_API_ENDPOINT";

const MIN_SNACKBAR_SHOW_TIME_MS: u64 = 500;
const MAX_SNACKBAR_SHOW_TIME_MS: u64 = 30_000;

// ============================================
// CONFIG STRUCTS
// ============================================

/// Connection settings for the subway backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Extra attempts for idempotent reads that hit a transient status.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_initial_interval_ms")]
    pub retry_initial_interval_ms: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_initial_interval(&self) -> Duration {
        Duration::from_millis(self.retry_initial_interval_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_endpoint: default_api_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
            retry_initial_interval_ms: default_retry_initial_interval_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_snackbar_show_time_ms")]
    pub snackbar_show_time_ms: u64,
}

impl UiConfig {
    pub fn snackbar_show_time(&self) -> Duration {
        Duration::from_millis(self.snackbar_show_time_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            snackbar_show_time_ms: default_snackbar_show_time_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            server: ServerConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_initial_interval_ms() -> u64 {
    200
}
fn default_snackbar_show_time_ms() -> u64 {
    3_000
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Platform config directory for the client, e.g. `~/.config/subway`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file is missing.
    /// Returns `Err(ConfigError)` if the file exists but is corrupted or invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {e}");
            ConfigError::Read {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ClientConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {e}");
            ConfigError::Parse {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Apply `SUBWAY_API_ENDPOINT` (after loading a `.env` file, if any).
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded .env from: {}", path.display()),
            Err(_) => debug!("No .env file found - using process environment"),
        }

        if let Ok(endpoint) = std::env::var(API_ENDPOINT_ENV) {
            info!("{API_ENDPOINT_ENV} overrides api endpoint with {endpoint}");
            self.server.api_endpoint = endpoint;
            self.validate()?;
        }

        Ok(self)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation, directory creation, serialization,
    /// the temp file write or the rename fails.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::Write {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        let endpoint = &self.server.api_endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid API endpoint: {endpoint}"),
            });
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("request_timeout_secs must be greater than zero"),
            });
        }

        let show_time = self.ui.snackbar_show_time_ms;
        if !(MIN_SNACKBAR_SHOW_TIME_MS..=MAX_SNACKBAR_SHOW_TIME_MS).contains(&show_time) {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid snackbar show time: {show_time}ms (must be {MIN_SNACKBAR_SHOW_TIME_MS}-{MAX_SNACKBAR_SHOW_TIME_MS})"
                ),
            });
        }

        Ok(())
    }
}
