//! Error types for obrasmap.
//!
//! Load failures are terminal for the session: the dashboard reports them
//! once and stays in its pre-load state. Missing per-project properties are
//! never errors; the core substitutes defaults for them.

use thiserror::Error;

/// The main error type for obrasmap operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Dataset Errors ===
    /// The dataset could not be retrieved (I/O or network failure).
    #[error("failed to fetch dataset from {location}: {message}")]
    DatasetFetch {
        /// Where the dataset was fetched from.
        location: String,
        /// Description of what went wrong.
        message: String,
    },

    /// The dataset request completed with a non-success status.
    #[error("dataset request to {location} returned status {status}")]
    DatasetStatus {
        /// Where the dataset was fetched from.
        location: String,
        /// Transport status code.
        status: u16,
    },

    /// The dataset body is not valid GeoJSON.
    #[error("malformed dataset at {location}: {message}")]
    DatasetParse {
        /// Where the dataset was fetched from.
        location: String,
        /// Parser message.
        message: String,
    },

    /// The dataset is valid GeoJSON but not a feature collection.
    #[error("dataset at {location} is a {found}, expected a FeatureCollection")]
    NotAFeatureCollection {
        /// Where the dataset was fetched from.
        location: String,
        /// The GeoJSON object type that was found.
        found: &'static str,
    },

    /// An operation needs the dataset but it is not loaded.
    #[error("dataset is not loaded")]
    DatasetNotLoaded,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for obrasmap operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a dataset fetch error.
    #[must_use]
    pub fn dataset_fetch(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DatasetFetch {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a dataset parse error.
    #[must_use]
    pub fn dataset_parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DatasetParse {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error means the dataset could not be loaded.
    #[must_use]
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::DatasetFetch { .. }
                | Self::DatasetStatus { .. }
                | Self::DatasetParse { .. }
                | Self::NotAFeatureCollection { .. }
        )
    }
}
