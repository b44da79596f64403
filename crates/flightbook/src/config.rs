//! Configuration management for flightbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "flightbook";

/// Shared admin password used when none is configured.
const DEFAULT_ADMIN_PASSWORD: &str = "2025";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTBOOK_`, nested keys split on `__`)
/// 2. TOML config file at `~/.config/flightbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Admin configuration.
    pub admin: AdminConfig,
}

/// Which persistence backend holds the catalog and the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Two JSON files, one per store.
    #[default]
    Json,
    /// A single `SQLite` database with one table per store.
    Sqlite,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Persistence backend.
    pub backend: Backend,
    /// Directory holding the store files.
    /// Defaults to `~/.local/share/flightbook`
    pub data_dir: Option<PathBuf>,
    /// File name of the flight catalog (JSON backend).
    pub flights_file: String,
    /// File name of the booking ledger (JSON backend).
    pub bookings_file: String,
    /// File name of the database (`SQLite` backend).
    pub database_file: String,
}

/// Admin-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared password required for catalog changes and reports.
    pub password: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Json,
            data_dir: None, // Will be resolved to default at runtime
            flights_file: "flights.json".to_string(),
            bookings_file: "bookings.json".to_string(),
            database_file: "flightbook.db".to_string(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults are used instead.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FLIGHTBOOK_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration that keeps all stores under `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.storage.data_dir = Some(dir.into());
        config
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let storage = &self.storage;
        for (key, value) in [
            ("flights_file", &storage.flights_file),
            ("bookings_file", &storage.bookings_file),
            ("database_file", &storage.database_file),
        ] {
            if value.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "{key} must not be empty"
                )));
            }
        }

        // Both stores rewrite their file in full, so they must not share one.
        if storage.flights_file == storage.bookings_file {
            return Err(Error::config_validation(format!(
                "flights_file and bookings_file must differ (both are '{}')",
                storage.flights_file
            )));
        }

        if self.admin.password.is_empty() {
            return Err(Error::config_validation("admin password must not be empty"));
        }

        Ok(())
    }

    /// Get the data directory, resolving defaults if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Path of the flight catalog file.
    #[must_use]
    pub fn flights_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.flights_file)
    }

    /// Path of the booking ledger file.
    #[must_use]
    pub fn bookings_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.bookings_file)
    }

    /// Path of the `SQLite` database.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.database_file)
    }
}
