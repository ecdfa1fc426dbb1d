//! Presentation collaborators.
//!
//! The dashboard hands display-ready data to these traits and never draws
//! anything itself. Map layers and charts are identified by handles so the
//! controller can tear the previous ones down before creating new ones.

use obrasmap_core::{
    Bounds, ChartConfig, FilterCriteria, FilterOptions, KpiView, Marker, ProjectView,
};

use crate::config::MapView;

/// Identifies a map layer created by a [`MapSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

/// Identifies a chart created by a [`ChartSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// Map renderer.
pub trait MapSink {
    /// Add a marker layer; each marker carries its popup content.
    fn add_layer(&mut self, markers: &[Marker]) -> LayerHandle;

    /// Remove a layer previously returned by [`MapSink::add_layer`].
    fn remove_layer(&mut self, layer: LayerHandle);

    /// Zoom the map to a bounding box.
    fn fit_bounds(&mut self, bounds: &Bounds);

    /// Move the map to a fixed view.
    fn set_view(&mut self, view: &MapView);
}

/// Chart renderer.
pub trait ChartSink {
    /// Draw a chart.
    fn render(&mut self, config: &ChartConfig) -> ChartHandle;

    /// Destroy a chart previously returned by [`ChartSink::render`].
    fn destroy(&mut self, chart: ChartHandle);
}

/// Table renderer.
pub trait TableSink {
    /// Replace every row of the table.
    fn replace_rows(&mut self, rows: &[ProjectView]);
}

/// KPI renderer.
pub trait KpiSink {
    /// Show the KPI texts.
    fn show(&mut self, kpis: &KpiView);
}

/// User-visible notices.
pub trait Notifier {
    /// Show a blocking error notice.
    fn notify_error(&mut self, message: &str);
}

/// The filter widgets.
pub trait FilterControls {
    /// Fill the selectable values.
    fn populate(&mut self, options: &FilterOptions);

    /// Current selections.
    fn read(&self) -> FilterCriteria;
}

/// Every collaborator the dashboard talks to.
pub struct Sinks {
    /// Map renderer.
    pub map: Box<dyn MapSink>,
    /// Chart renderer.
    pub charts: Box<dyn ChartSink>,
    /// Table renderer.
    pub table: Box<dyn TableSink>,
    /// KPI renderer.
    pub kpis: Box<dyn KpiSink>,
    /// Notice channel.
    pub notifier: Box<dyn Notifier>,
    /// Filter widgets.
    pub controls: Box<dyn FilterControls>,
}

impl std::fmt::Debug for Sinks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sinks").finish_non_exhaustive()
    }
}
