//! Configuration management for obrasmap.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use obrasmap_core::{Labels, Location, NumberLocale, PropertyKeys, StatusMarkers};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::loader::DatasetSource;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration directory name.
const CONFIG_DIR_NAME: &str = "obrasmap";

/// Public dataset of Mar del Plata public works.
const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/cartosantacruz/zas/main/data/obras.geojson";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `OBRASMAP_`, sections split on `__`)
/// 2. TOML config file at `~/.config/obrasmap/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset location.
    pub dataset: DatasetConfig,
    /// GeoJSON property names.
    pub properties: PropertyKeys,
    /// Status markers for the KPI buckets.
    pub status: StatusMarkers,
    /// Number formatting and placeholder texts.
    pub display: DisplayConfig,
    /// Map view.
    pub map: MapConfig,
}

/// Dataset-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Local path or `http(s)` URL of the GeoJSON document.
    pub source: String,
    /// Request timeout for remote datasets.
    pub timeout_secs: u64,
}

/// Display-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Number locale.
    pub locale: NumberLocale,
    /// Placeholder texts.
    pub labels: Labels,
}

/// Map-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial centre latitude.
    pub center_lat: f64,
    /// Initial centre longitude.
    pub center_lon: f64,
    /// Initial zoom level.
    pub zoom: u8,
    /// Maximum zoom level.
    pub max_zoom: u8,
    /// Tile URL template.
    pub tile_url: String,
    /// Tile attribution.
    pub attribution: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_DATASET_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: -38.0055,
            center_lon: -57.5426,
            zoom: 13,
            max_zoom: 19,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "© OpenStreetMap contributors".to_string(),
        }
    }
}

/// The map view a renderer starts from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    /// View centre.
    pub center: Location,
    /// Zoom level.
    pub zoom: u8,
}

impl MapConfig {
    /// The initial map view.
    #[must_use]
    pub fn initial_view(&self) -> MapView {
        MapView {
            center: Location {
                lon: self.center_lon,
                lat: self.center_lat,
            },
            zoom: self.zoom,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("OBRASMAP_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a single config file over the defaults.
    ///
    /// Unlike [`Config::load_from`], the file must exist and environment
    /// overrides are not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unparsable or invalid.
    pub fn validate_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::config_validation(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.dataset.source.trim().is_empty() {
            return Err(Error::config_validation("dataset.source must not be empty"));
        }

        if self.dataset.timeout_secs == 0 {
            return Err(Error::config_validation(
                "dataset.timeout_secs must be greater than 0",
            ));
        }

        // An empty marker would match every status
        if self.status.in_progress.is_empty() || self.status.finished.is_empty() {
            return Err(Error::config_validation("status markers must not be empty"));
        }

        let locale = &self.display.locale;
        if locale.decimal_separator.is_empty() {
            return Err(Error::config_validation(
                "display.locale.decimal_separator must not be empty",
            ));
        }
        if locale.decimal_separator == locale.thousands_separator {
            return Err(Error::config_validation(format!(
                "decimal and thousands separators must differ (both are {:?})",
                locale.decimal_separator
            )));
        }

        if self.map.zoom > self.map.max_zoom {
            return Err(Error::config_validation(format!(
                "map.zoom ({}) cannot be greater than map.max_zoom ({})",
                self.map.zoom, self.map.max_zoom
            )));
        }
        if !(-90.0..=90.0).contains(&self.map.center_lat) {
            return Err(Error::config_validation(format!(
                "map.center_lat out of range: {}",
                self.map.center_lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.map.center_lon) {
            return Err(Error::config_validation(format!(
                "map.center_lon out of range: {}",
                self.map.center_lon
            )));
        }

        Ok(())
    }

    /// The configured dataset source.
    #[must_use]
    pub fn dataset_source(&self) -> DatasetSource {
        DatasetSource::parse(&self.dataset.source)
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.dataset.timeout_secs)
    }
}
