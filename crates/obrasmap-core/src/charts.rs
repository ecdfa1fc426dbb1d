//! Label-to-count series for the dashboard charts.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::project::{Project, ProjectCollection};

/// Which chart a series feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Projects per locality.
    ByLocality,
    /// Projects per type of work.
    ByKind,
}

impl ChartKind {
    /// Both charts, in display order.
    pub const ALL: [Self; 2] = [Self::ByLocality, Self::ByKind];

    /// Chart title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::ByLocality => "Obras por localidad",
            Self::ByKind => "Obras por tipo",
        }
    }

    fn field(self) -> fn(&Project) -> Option<&str> {
        match self {
            Self::ByLocality => Project::locality,
            Self::ByKind => Project::kind,
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByLocality => write!(f, "by_locality"),
            Self::ByKind => write!(f, "by_kind"),
        }
    }
}

/// Everything a chart renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartConfig {
    /// Chart identity.
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// Bar labels, sorted.
    pub labels: Vec<String>,
    /// Bar values, parallel to `labels`.
    pub values: Vec<usize>,
}

impl ChartConfig {
    /// Build the config for one chart over the filtered projects.
    ///
    /// Projects with a missing value are counted under `placeholder`.
    #[must_use]
    pub fn build(kind: ChartKind, filtered: &ProjectCollection, placeholder: &str) -> Self {
        let counts = count_by(filtered, kind.field(), placeholder);
        let (labels, values) = counts.into_iter().unzip();
        Self {
            kind,
            title: kind.title().to_string(),
            labels,
            values,
        }
    }

    /// Label/value pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Largest value, 0 for an empty chart.
    #[must_use]
    pub fn max_value(&self) -> usize {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Count projects per value of a field.
#[must_use]
pub fn count_by(
    filtered: &ProjectCollection,
    field: fn(&Project) -> Option<&str>,
    placeholder: &str,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for project in filtered {
        let label = field(project).unwrap_or(placeholder);
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}
