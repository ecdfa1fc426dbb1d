//! `obrasmap` - A public-works map dashboard
//!
//! This library loads a GeoJSON dataset of public works, keeps the dashboard
//! state and pushes filtered, formatted views to pluggable presentation
//! sinks. The filtering and aggregation rules live in [`obrasmap_core`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod logging;
pub mod report;
pub mod sinks;

pub use config::{Config, MapView};
pub use dashboard::{Dashboard, DashboardSettings, LoadState, Snapshot};
pub use error::{Error, Result};
pub use loader::{Dataset, DatasetLoader, DatasetSource, DefaultFetcher, Fetcher};
pub use logging::init_logging;
pub use report::{recording_sinks, Report, SharedReport};
pub use sinks::Sinks;
