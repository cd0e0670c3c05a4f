//! Configuration file handling for ~/.geohud/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::settings::{ConfigFile, GeocoderKind};
use crate::provider::GeocoderConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.geohud/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        ensure_exists_at(&config_file_path())
    }

    /// Geocoder selection as the provider factory expects it.
    ///
    /// A missing LocationIQ key is passed through empty; the factory
    /// reports it when the geocoder is created.
    pub fn geocoder_config(&self) -> GeocoderConfig {
        let config = match self.geocoder.provider {
            GeocoderKind::LocationIq => {
                GeocoderConfig::locationiq(self.geocoder.api_key.clone().unwrap_or_default())
            }
            GeocoderKind::Nominatim => GeocoderConfig::nominatim(),
        };
        match &self.geocoder.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }

    /// Per-request timeout for every provider.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.network.timeout)
    }
}

fn ensure_exists_at(path: &Path) -> Result<PathBuf, ConfigFileError> {
    if !path.exists() {
        ConfigFile::default().save_to(path)?;
    }
    Ok(path.to_path_buf())
}

/// Get the path to the config directory (~/.geohud).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geohud")
}

/// Get the path to the config file (~/.geohud/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
