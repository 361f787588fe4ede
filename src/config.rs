//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the hijri-compass.toml file.
//! It provides the observer location used for Qibla and mosque ranking, calendar
//! layout preferences, and the default mosque search radius.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "hijri-compass.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid location: {0}")]
    Location(#[from] crate::geo::GeoError),
}

/// Application configuration loaded from hijri-compass.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Where the user is standing
    pub location: LocationConfig,
    /// Calendar layout
    #[serde(default)]
    pub calendar: CalendarConfig,
    /// Mosque finder defaults
    #[serde(default)]
    pub mosques: MosqueConfig,
}

/// Observer location
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocationConfig {
    /// Human-readable place name for reference
    pub name: String,
    /// Decimal degrees, north positive
    pub latitude: f64,
    /// Decimal degrees, east positive
    pub longitude: f64,
}

impl LocationConfig {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Calendar layout configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CalendarConfig {
    /// Start weeks on Monday instead of Sunday
    #[serde(default)]
    pub week_starts_monday: bool,
}

/// Mosque finder configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MosqueConfig {
    /// Default search radius in kilometres
    pub search_radius_km: f64,
}

impl Default for MosqueConfig {
    fn default() -> Self {
        MosqueConfig {
            search_radius_km: 5.0,
        }
    }
}

impl ConfigError {
    /// True only when the config file does not exist. Other IO failures
    /// (permissions, a directory at the path) are real errors.
    pub fn is_missing_file(&self) -> bool {
        matches!(self, ConfigError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            location: LocationConfig {
                name: "Makkah".to_string(),
                latitude: 21.4225,
                longitude: 39.8262,
            },
            calendar: CalendarConfig::default(),
            mosques: MosqueConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from hijri-compass.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match Self::try_load_from_path(&path) {
            Ok(config) => {
                info!(location = %config.location.name, "loaded configuration");
                config
            }
            Err(e) if e.is_missing_file() => {
                info!(
                    path = %path.as_ref().display(),
                    "no config file found, using default configuration (Makkah)"
                );
                Self::default()
            }
            Err(e) => {
                warn!("{e}; using default configuration (Makkah)");
                Self::default()
            }
        }
    }

    /// Strict load: any missing file, parse failure or out-of-range location is an error
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        GeoPoint::try_new(config.location.latitude, config.location.longitude)?;
        Ok(config)
    }

    /// Save current configuration to `path`
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }
}
