//! Display-ready views handed to the presentation sinks.
//!
//! Every sink receives already-formatted text so that placeholders, number
//! formatting and the progress policy are applied in exactly one place.

use serde::{Deserialize, Serialize};

use crate::aggregate::KpiSummary;
use crate::format::{format_count, format_currency, format_for_display, NumberLocale, ScaledAmount};
use crate::progress::ProgressDisplay;
use crate::project::{Location, Project};

/// Fixed texts substituted for missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    /// Placeholder for missing text and amounts.
    pub placeholder: String,
    /// Shown instead of a progress bar.
    pub not_reported: String,
    /// Popup status when the project has none.
    pub unspecified_status: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            placeholder: "N/A".to_string(),
            not_reported: "No informado".to_string(),
            unspecified_status: "No especificado".to_string(),
        }
    }
}

/// One project, formatted for a table row or a popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    /// Name or placeholder.
    pub name: String,
    /// Locality or placeholder.
    pub locality: String,
    /// Agency or placeholder.
    pub agency: String,
    /// Type or placeholder.
    pub kind: String,
    /// Status or fallback.
    pub status: String,
    /// Currency amount or placeholder.
    pub amount: String,
    /// Progress policy result.
    pub progress: ProgressDisplay,
    /// Progress text.
    pub progress_label: String,
}

impl ProjectView {
    /// Format a project as a table row.
    #[must_use]
    pub fn table_row(project: &Project, locale: &NumberLocale, labels: &Labels) -> Self {
        Self::build(project, locale, labels, &labels.placeholder)
    }

    /// Format a project as popup content.
    #[must_use]
    pub fn popup(project: &Project, locale: &NumberLocale, labels: &Labels) -> Self {
        Self::build(project, locale, labels, &labels.unspecified_status)
    }

    fn build(project: &Project, locale: &NumberLocale, labels: &Labels, no_status: &str) -> Self {
        let text = |value: Option<&str>| value.unwrap_or(&labels.placeholder).to_string();
        let progress = ProgressDisplay::from_value(project.progress);
        Self {
            name: text(project.name()),
            locality: text(project.locality()),
            agency: text(project.agency()),
            kind: text(project.kind()),
            status: project.status().unwrap_or(no_status).to_string(),
            amount: project.amount.map_or_else(
                || labels.placeholder.clone(),
                |a| format_currency(a, locale),
            ),
            progress_label: progress.label(locale, &labels.not_reported),
            progress,
        }
    }
}

/// A map marker and its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Marker position.
    pub location: Location,
    /// Popup content.
    pub popup: ProjectView,
}

impl Marker {
    /// Marker for a project, or `None` when it has no location.
    #[must_use]
    pub fn for_project(project: &Project, locale: &NumberLocale, labels: &Labels) -> Option<Self> {
        project.location.map(|location| Self {
            location,
            popup: ProjectView::popup(project, locale, labels),
        })
    }
}

/// KPI texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiView {
    /// Number of projects.
    pub count: String,
    /// Total amount, unit-scaled.
    pub total_amount: ScaledAmount,
    /// Works in execution.
    pub in_progress: String,
    /// Finished works.
    pub finished: String,
    /// Currency symbol for the total.
    pub currency_symbol: String,
}

impl KpiView {
    /// Format a KPI summary.
    #[must_use]
    pub fn new(summary: &KpiSummary, locale: &NumberLocale) -> Self {
        Self {
            count: format_count(summary.count, locale),
            total_amount: format_for_display(summary.total_amount, locale),
            in_progress: format_count(summary.in_progress_count, locale),
            finished: format_count(summary.finished_count, locale),
            currency_symbol: locale.currency_symbol.clone(),
        }
    }

    /// Total amount with currency symbol, e.g. `$ 5,50 millones`.
    #[must_use]
    pub fn total_label(&self) -> String {
        format!("{} {}", self.currency_symbol, self.total_amount)
    }
}
