//! Dataset loading.
//!
//! The dataset is retrieved once, through a [`Fetcher`], and parsed into an
//! immutable [`Dataset`]. Any failure along the way (transport error,
//! non-success status, malformed GeoJSON) is terminal: there is no retry.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use geojson::GeoJson;
use obrasmap_core::{ProjectCollection, PropertyKeys};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// A local file.
    Path(PathBuf),
    /// An `http` or `https` URL.
    Url(String),
}

impl DatasetSource {
    /// Interpret a configured location: URLs by scheme, anything else as a path.
    #[must_use]
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::Path(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Raw result of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Transport status code; local files report 200.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl FetchResponse {
    /// A successful response.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves the raw dataset document.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the document at `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be retrieved at all. A
    /// completed request with a non-success status is returned as a
    /// response, not an error.
    async fn fetch(&self, source: &DatasetSource) -> Result<FetchResponse>;
}

/// Reads local files with tokio and remote URLs with reqwest.
#[derive(Debug, Clone)]
pub struct DefaultFetcher {
    client: reqwest::Client,
}

impl DefaultFetcher {
    /// Create a fetcher whose HTTP requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for DefaultFetcher {
    async fn fetch(&self, source: &DatasetSource) -> Result<FetchResponse> {
        match source {
            DatasetSource::Path(path) => {
                let body = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| Error::dataset_fetch(source.to_string(), e.to_string()))?;
                Ok(FetchResponse::ok(body))
            }
            DatasetSource::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| Error::dataset_fetch(url.clone(), describe_request_error(&e)))?;
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .map_err(|e| Error::dataset_fetch(url.clone(), e.to_string()))?;
                Ok(FetchResponse { status, body })
            }
        }
    }
}

fn describe_request_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {e}")
    } else if e.is_connect() {
        format!("connection failed: {e}")
    } else {
        e.to_string()
    }
}

/// The loaded dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All projects, in document order.
    pub projects: ProjectCollection,
    /// Where the dataset was loaded from.
    pub source: String,
    /// When loading completed.
    pub loaded_at: DateTime<Utc>,
}

/// Fetches and parses the dataset.
#[derive(Debug)]
pub struct DatasetLoader<F> {
    fetcher: F,
    keys: PropertyKeys,
}

impl<F: Fetcher> DatasetLoader<F> {
    /// Create a loader that reads properties by `keys`.
    #[must_use]
    pub fn new(fetcher: F, keys: PropertyKeys) -> Self {
        Self { fetcher, keys }
    }

    /// Fetch and parse the dataset.
    ///
    /// # Errors
    ///
    /// Returns a load failure (see [`Error::is_load_failure`]) when the fetch
    /// fails, the status is not 2xx or the body is not a GeoJSON feature
    /// collection.
    pub async fn load(&self, source: &DatasetSource) -> Result<Dataset> {
        info!(source = %source, "Fetching dataset");
        let response = self.fetcher.fetch(source).await?;
        if !response.is_success() {
            return Err(Error::DatasetStatus {
                location: source.to_string(),
                status: response.status,
            });
        }

        let projects = parse_dataset(&response.body, &self.keys, &source.to_string())?;
        info!(count = projects.len(), "Dataset loaded");
        Ok(Dataset {
            projects,
            source: source.to_string(),
            loaded_at: Utc::now(),
        })
    }
}

/// Parse a GeoJSON feature collection into projects.
///
/// # Errors
///
/// Returns an error if `body` is not GeoJSON or not a feature collection.
pub fn parse_dataset(body: &str, keys: &PropertyKeys, location: &str) -> Result<ProjectCollection> {
    let geojson: GeoJson = body
        .parse()
        .map_err(|e: geojson::Error| Error::dataset_parse(location, e.to_string()))?;

    match geojson {
        GeoJson::FeatureCollection(collection) => {
            let features = collection.features.len();
            debug!(features, "Parsed feature collection");
            Ok(ProjectCollection::from_features(&collection.features, keys))
        }
        GeoJson::Feature(_) => Err(Error::NotAFeatureCollection {
            location: location.to_string(),
            found: "Feature",
        }),
        GeoJson::Geometry(_) => Err(Error::NotAFeatureCollection {
            location: location.to_string(),
            found: "Geometry",
        }),
    }
}
