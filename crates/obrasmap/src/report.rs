//! Recording presentation sinks and the terminal report built from them.
//!
//! The command-line host has no map widget or chart canvas: its sinks record
//! what they were asked to draw into a shared [`Report`], which is then
//! printed as plain text or JSON. The same sinks serve as test doubles.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use obrasmap_core::{
    Bounds, ChartConfig, FilterCriteria, FilterOptions, KpiView, Marker, ProjectView,
};
use serde::Serialize;

use crate::config::MapView;
use crate::sinks::{
    ChartHandle, ChartSink, FilterControls, KpiSink, LayerHandle, MapSink, Notifier, Sinks,
    TableSink,
};

/// A report shared between the recording sinks.
pub type SharedReport = Rc<RefCell<Report>>;

/// A live map layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedLayer {
    /// Layer handle id.
    pub id: u64,
    /// Markers on the layer.
    pub markers: Vec<Marker>,
}

/// A live chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedChart {
    /// Chart handle id.
    pub id: u64,
    /// What was drawn.
    pub config: ChartConfig,
}

/// The last map viewport requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Viewport {
    /// Fitted to the markers.
    Fit {
        /// Bounding box.
        bounds: Bounds,
    },
    /// Fixed view.
    Fixed {
        /// The view.
        view: MapView,
    },
}

/// Everything the sinks currently display.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    /// Dataset source.
    pub source: Option<String>,
    /// Dataset load time.
    pub loaded_at: Option<DateTime<Utc>>,
    /// What the filter controls currently hold.
    pub selection: FilterCriteria,
    /// Option lists the controls were populated with.
    pub options: Option<FilterOptions>,
    /// KPI texts.
    pub kpis: Option<KpiView>,
    /// Live charts.
    pub charts: Vec<RecordedChart>,
    /// Live map layers.
    pub layers: Vec<RecordedLayer>,
    /// Map viewport.
    pub viewport: Option<Viewport>,
    /// Table rows.
    pub rows: Vec<ProjectView>,
    /// Error notices shown to the user.
    pub notices: Vec<String>,
    /// Layers removed so far.
    pub removed_layers: usize,
    /// Charts destroyed so far.
    pub destroyed_charts: usize,
    #[serde(skip)]
    next_id: u64,
}

impl Report {
    /// Create an empty shared report.
    #[must_use]
    pub fn shared() -> SharedReport {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Create an empty shared report whose controls hold `selection`.
    #[must_use]
    pub fn shared_with_selection(selection: FilterCriteria) -> SharedReport {
        Rc::new(RefCell::new(Self {
            selection,
            ..Self::default()
        }))
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Number of markers across live layers.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.layers.iter().map(|l| l.markers.len()).sum()
    }

    /// Whether anything was rendered.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.options.is_none()
            && self.kpis.is_none()
            && self.charts.is_empty()
            && self.layers.is_empty()
            && self.rows.is_empty()
    }
}

#[derive(Debug)]
struct RecordingMap(SharedReport);

impl MapSink for RecordingMap {
    fn add_layer(&mut self, markers: &[Marker]) -> LayerHandle {
        let mut report = self.0.borrow_mut();
        let id = report.next_id();
        report.layers.push(RecordedLayer {
            id,
            markers: markers.to_vec(),
        });
        LayerHandle(id)
    }

    fn remove_layer(&mut self, layer: LayerHandle) {
        let mut report = self.0.borrow_mut();
        report.layers.retain(|l| l.id != layer.0);
        report.removed_layers += 1;
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        self.0.borrow_mut().viewport = Some(Viewport::Fit { bounds: *bounds });
    }

    fn set_view(&mut self, view: &MapView) {
        self.0.borrow_mut().viewport = Some(Viewport::Fixed { view: view.clone() });
    }
}

#[derive(Debug)]
struct RecordingCharts(SharedReport);

impl ChartSink for RecordingCharts {
    fn render(&mut self, config: &ChartConfig) -> ChartHandle {
        let mut report = self.0.borrow_mut();
        let id = report.next_id();
        report.charts.push(RecordedChart {
            id,
            config: config.clone(),
        });
        ChartHandle(id)
    }

    fn destroy(&mut self, chart: ChartHandle) {
        let mut report = self.0.borrow_mut();
        report.charts.retain(|c| c.id != chart.0);
        report.destroyed_charts += 1;
    }
}

#[derive(Debug)]
struct RecordingTable(SharedReport);

impl TableSink for RecordingTable {
    fn replace_rows(&mut self, rows: &[ProjectView]) {
        self.0.borrow_mut().rows = rows.to_vec();
    }
}

#[derive(Debug)]
struct RecordingKpis(SharedReport);

impl KpiSink for RecordingKpis {
    fn show(&mut self, kpis: &KpiView) {
        self.0.borrow_mut().kpis = Some(kpis.clone());
    }
}

#[derive(Debug)]
struct RecordingNotifier(SharedReport);

impl Notifier for RecordingNotifier {
    fn notify_error(&mut self, message: &str) {
        self.0.borrow_mut().notices.push(message.to_string());
    }
}

#[derive(Debug)]
struct RecordingControls(SharedReport);

impl FilterControls for RecordingControls {
    fn populate(&mut self, options: &FilterOptions) {
        self.0.borrow_mut().options = Some(options.clone());
    }

    fn read(&self) -> FilterCriteria {
        self.0.borrow().selection.clone()
    }
}

/// Sinks that record into `report`.
#[must_use]
pub fn recording_sinks(report: &SharedReport) -> Sinks {
    Sinks {
        map: Box::new(RecordingMap(Rc::clone(report))),
        charts: Box::new(RecordingCharts(Rc::clone(report))),
        table: Box::new(RecordingTable(Rc::clone(report))),
        kpis: Box::new(RecordingKpis(Rc::clone(report))),
        notifier: Box::new(RecordingNotifier(Rc::clone(report))),
        controls: Box::new(RecordingControls(Rc::clone(report))),
    }
}

const BAR_WIDTH: usize = 20;
const PROGRESS_WIDTH: usize = 10;

/// Render the report as plain text, showing at most `row_limit` table rows.
#[must_use]
pub fn render_plain(report: &Report, row_limit: usize) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_plain(&mut out, report, row_limit);
    out
}

fn write_plain(out: &mut String, report: &Report, row_limit: usize) -> std::fmt::Result {
    if let Some(source) = &report.source {
        write!(out, "Fuente: {source}")?;
        if let Some(loaded_at) = report.loaded_at {
            let stamp = loaded_at.format("%Y-%m-%d %H:%M:%S UTC");
            write!(out, " (cargado {stamp})")?;
        }
        writeln!(out)?;
    }

    let selection = &report.selection;
    writeln!(
        out,
        "Filtros: localidad={} organismo={} tipo={} nombre={:?}",
        selection.locality, selection.agency, selection.kind, selection.name_query
    )?;
    writeln!(out)?;

    if let Some(kpis) = &report.kpis {
        writeln!(out, "Indicadores")?;
        writeln!(out, "  Obras:          {}", kpis.count)?;
        writeln!(out, "  Monto total:    {}", kpis.total_label())?;
        writeln!(out, "  En ejecución:   {}", kpis.in_progress)?;
        writeln!(out, "  Finalizadas:    {}", kpis.finished)?;
        writeln!(out)?;
    }

    for chart in &report.charts {
        write_chart(out, &chart.config)?;
        writeln!(out)?;
    }

    writeln!(out, "Mapa: {} marcadores", report.marker_count())?;
    match &report.viewport {
        Some(Viewport::Fit { bounds }) => {
            let (sw, ne) = (bounds.south_west, bounds.north_east);
            writeln!(
                out,
                "  encuadre: ({:.4}, {:.4}) a ({:.4}, {:.4})",
                sw.lat, sw.lon, ne.lat, ne.lon
            )?;
        }
        Some(Viewport::Fixed { view }) => writeln!(
            out,
            "  vista: ({:.4}, {:.4}) zoom {}",
            view.center.lat, view.center.lon, view.zoom
        )?,
        None => {}
    }
    writeln!(out)?;

    write_table(out, &report.rows, row_limit)?;

    for notice in &report.notices {
        writeln!(out, "ERROR: {notice}")?;
    }
    Ok(())
}

fn write_chart(out: &mut String, chart: &ChartConfig) -> std::fmt::Result {
    writeln!(out, "{}", chart.title)?;
    let label_width = chart
        .labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.max_value().max(1);
    for (label, value) in chart.entries() {
        let len = (value * BAR_WIDTH).div_ceil(max);
        writeln!(
            out,
            "  {label:<label_width$}  {} {value}",
            "█".repeat(len),
        )?;
    }
    Ok(())
}

fn write_table(out: &mut String, rows: &[ProjectView], row_limit: usize) -> std::fmt::Result {
    writeln!(out, "Obras ({})", rows.len())?;
    if rows.is_empty() {
        return Ok(());
    }

    let headers = [
        "Nombre",
        "Localidad",
        "Organismo",
        "Tipo",
        "Estado",
        "Monto",
        "Avance",
    ];
    let shown = &rows[..rows.len().min(row_limit)];
    let cells: Vec<[String; 7]> = shown
        .iter()
        .map(|row| {
            [
                row.name.clone(),
                row.locality.clone(),
                row.agency.clone(),
                row.kind.clone(),
                row.status.clone(),
                row.amount.clone(),
                progress_cell(row),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_row(out, &headers.map(str::to_string), &widths)?;
    for row in &cells {
        write_row(out, row, &widths)?;
    }
    if rows.len() > shown.len() {
        writeln!(out, "  ... {} más", rows.len() - shown.len())?;
    }
    Ok(())
}

fn write_row(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) -> std::fmt::Result {
    write!(out, " ")?;
    for (cell, width) in cells.iter().zip(widths) {
        write!(out, " {cell:<width$} |")?;
    }
    writeln!(out)
}

fn progress_cell(row: &ProjectView) -> String {
    match row.progress.bar_width() {
        Some(percent) => {
            // percent is within 0..=100
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            let filled = ((percent / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
            format!(
                "[{}{}] {}",
                "#".repeat(filled),
                " ".repeat(PROGRESS_WIDTH - filled),
                row.progress_label
            )
        }
        None => row.progress_label.clone(),
    }
}

/// Render the filter option lists as plain text.
#[must_use]
pub fn render_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    for (title, values) in [
        ("Localidades", &options.localities),
        ("Organismos", &options.agencies),
        ("Tipos", &options.kinds),
    ] {
        let _ = writeln!(out, "{title} ({})", values.len());
        for value in values {
            let _ = writeln!(out, "  {value}");
        }
    }
    out
}
