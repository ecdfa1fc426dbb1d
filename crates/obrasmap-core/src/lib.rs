//! `obrasmap-core` - data model and pure transformations of the public-works dashboard
//!
//! Everything in this crate is synchronous and free of I/O: projects are
//! extracted from GeoJSON features, filtered by the user's criteria,
//! aggregated into KPIs and formatted into the views that the presentation
//! layer consumes.
//!
//! ```
//! use obrasmap_core::{
//!     aggregate, filter_projects, FilterCriteria, Project, ProjectCollection, StatusMarkers,
//! };
//!
//! let all = ProjectCollection::new(vec![Project {
//!     name: Some("New Bridge Project".to_string()),
//!     amount: Some(1000.0),
//!     ..Project::default()
//! }]);
//!
//! let criteria = FilterCriteria::all().with_name_query(" bridge ");
//! let filtered = filter_projects(&all, &criteria);
//! let summary = aggregate(&filtered, &StatusMarkers::default());
//! assert_eq!(summary.count, 1);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod bounds;
pub mod charts;
pub mod criteria;
pub mod display;
pub mod filter;
pub mod format;
pub mod options;
pub mod progress;
pub mod project;

pub use aggregate::{aggregate, KpiSummary, StatusMarkers};
pub use bounds::Bounds;
pub use charts::{ChartConfig, ChartKind};
pub use criteria::{FilterCriteria, Selection, ALL};
pub use display::{KpiView, Labels, Marker, ProjectView};
pub use filter::filter_projects;
pub use format::{format_for_display, NumberLocale, ScaledAmount};
pub use options::FilterOptions;
pub use progress::ProgressDisplay;
pub use project::{Location, Project, ProjectCollection, PropertyKeys};
