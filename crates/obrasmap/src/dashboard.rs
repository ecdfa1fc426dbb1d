//! The dashboard controller.
//!
//! [`Dashboard`] owns the loaded dataset, the current criteria, the
//! presentation sinks and the handles of whatever it last drew. Every
//! control change goes through [`Dashboard::apply`], which recomputes the
//! filtered collection and KPIs from scratch and redraws every sink after
//! tearing down the previous map layer and charts.

use obrasmap_core::{
    aggregate, filter_projects, Bounds, ChartConfig, ChartKind, FilterCriteria, FilterOptions,
    KpiSummary, KpiView, Labels, Marker, NumberLocale, ProjectCollection, ProjectView,
    StatusMarkers,
};
use tracing::{debug, error, info, trace};

use crate::config::{Config, MapView};
use crate::error::{Error, Result};
use crate::loader::{Dataset, DatasetLoader, DatasetSource, Fetcher};
use crate::sinks::{ChartHandle, LayerHandle, Sinks};

/// Notice shown to the user when the dataset cannot be loaded.
pub const LOAD_FAILURE_NOTICE: &str =
    "Error al cargar los datos de obras. Revisá el registro para más detalles.";

/// Settings that shape what the dashboard shows.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// KPI bucket markers.
    pub markers: StatusMarkers,
    /// Number locale.
    pub locale: NumberLocale,
    /// Placeholder texts.
    pub labels: Labels,
    /// View used when no marker can be fitted.
    pub initial_view: MapView,
}

impl From<&Config> for DashboardSettings {
    fn from(config: &Config) -> Self {
        Self {
            markers: config.status.clone(),
            locale: config.display.locale.clone(),
            labels: config.display.labels.clone(),
            initial_view: config.map.initial_view(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Where the dashboard is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Waiting for the dataset.
    Pending,
    /// Dataset loaded.
    Ready(Dataset),
    /// Loading failed; terminal for the session.
    Failed(String),
}

/// Result of one recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Criteria the recompute used.
    pub criteria: FilterCriteria,
    /// Filtered projects.
    pub filtered: ProjectCollection,
    /// Aggregates of the filtered projects.
    pub summary: KpiSummary,
}

/// The single top-level controller.
#[derive(Debug)]
pub struct Dashboard {
    settings: DashboardSettings,
    sinks: Sinks,
    state: LoadState,
    criteria: FilterCriteria,
    layer: Option<LayerHandle>,
    charts: Vec<ChartHandle>,
}

impl Dashboard {
    /// Create a dashboard in the pending state. Nothing is drawn yet.
    #[must_use]
    pub fn new(settings: DashboardSettings, sinks: Sinks) -> Self {
        Self {
            settings,
            sinks,
            state: LoadState::Pending,
            criteria: FilterCriteria::all(),
            layer: None,
            charts: Vec::new(),
        }
    }

    /// Load the dataset and render the initial view.
    ///
    /// On failure the error is logged, one notice is shown, and the
    /// dashboard stays blank.
    ///
    /// # Errors
    ///
    /// Returns the load failure.
    pub async fn start<F: Fetcher>(
        &mut self,
        loader: &DatasetLoader<F>,
        source: &DatasetSource,
    ) -> Result<Snapshot> {
        match loader.load(source).await {
            Ok(dataset) => self.install(dataset),
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    /// Install a loaded dataset: populate the controls and render.
    ///
    /// # Errors
    ///
    /// Propagates errors from the first recompute.
    pub fn install(&mut self, dataset: Dataset) -> Result<Snapshot> {
        info!(
            source = %dataset.source,
            projects = dataset.projects.len(),
            "Dataset installed"
        );
        let options = FilterOptions::derive(&dataset.projects);
        self.sinks.controls.populate(&options);
        self.state = LoadState::Ready(dataset);
        let criteria = self.sinks.controls.read();
        self.recompute(criteria)
    }

    /// Record a load failure and tell the user once.
    pub fn fail(&mut self, err: &Error) {
        error!(error = %err, "Could not load the dataset");
        if matches!(self.state, LoadState::Failed(_)) {
            return;
        }
        self.state = LoadState::Failed(err.to_string());
        self.sinks.notifier.notify_error(LOAD_FAILURE_NOTICE);
    }

    /// Dispatch a control change: read the controls and recompute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotLoaded`] before a successful load.
    pub fn on_controls_changed(&mut self) -> Result<Snapshot> {
        let criteria = self.sinks.controls.read();
        self.apply(criteria)
    }

    /// Recompute for explicit criteria.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetNotLoaded`] before a successful load.
    pub fn apply(&mut self, criteria: FilterCriteria) -> Result<Snapshot> {
        self.recompute(criteria)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The loaded dataset, if any.
    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        match &self.state {
            LoadState::Ready(dataset) => Some(dataset),
            _ => None,
        }
    }

    /// Criteria of the last recompute.
    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    fn recompute(&mut self, criteria: FilterCriteria) -> Result<Snapshot> {
        let LoadState::Ready(dataset) = &self.state else {
            debug!("Ignoring control change before the dataset is loaded");
            return Err(Error::DatasetNotLoaded);
        };

        let filtered = filter_projects(&dataset.projects, &criteria);
        let summary = aggregate(&filtered, &self.settings.markers);
        debug!(
            locality = %criteria.locality,
            agency = %criteria.agency,
            kind = %criteria.kind,
            query = %criteria.name_query,
            count = summary.count,
            total_amount = summary.total_amount,
            in_progress = summary.in_progress_count,
            finished = summary.finished_count,
            "Recomputed dashboard"
        );

        self.teardown();
        self.render(&filtered, &summary);
        self.criteria = criteria.clone();

        Ok(Snapshot {
            criteria,
            filtered,
            summary,
        })
    }

    fn teardown(&mut self) {
        if let Some(layer) = self.layer.take() {
            trace!(layer = layer.0, "Removing map layer");
            self.sinks.map.remove_layer(layer);
        }
        for chart in self.charts.drain(..) {
            trace!(chart = chart.0, "Destroying chart");
            self.sinks.charts.destroy(chart);
        }
    }

    fn render(&mut self, filtered: &ProjectCollection, summary: &KpiSummary) {
        let DashboardSettings {
            locale,
            labels,
            initial_view,
            ..
        } = &self.settings;

        let markers: Vec<Marker> = filtered
            .iter()
            .filter_map(|p| Marker::for_project(p, locale, labels))
            .collect();
        self.layer = Some(self.sinks.map.add_layer(&markers));
        match Bounds::of(filtered) {
            Some(bounds) => self.sinks.map.fit_bounds(&bounds),
            None => self.sinks.map.set_view(initial_view),
        }

        self.charts = ChartKind::ALL
            .iter()
            .map(|kind| {
                let config = ChartConfig::build(*kind, filtered, &labels.placeholder);
                self.sinks.charts.render(&config)
            })
            .collect();

        let rows: Vec<ProjectView> = filtered
            .iter()
            .map(|p| ProjectView::table_row(p, locale, labels))
            .collect();
        self.sinks.table.replace_rows(&rows);

        self.sinks.kpis.show(&KpiView::new(summary, locale));
    }
}
