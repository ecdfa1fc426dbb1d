//! KPI aggregation over a filtered collection.

use serde::{Deserialize, Serialize};

use crate::project::ProjectCollection;

/// Status substrings that put a project into a KPI bucket.
///
/// Matching is a case-insensitive substring test on the status text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMarkers {
    /// Marker for works in execution.
    pub in_progress: String,
    /// Marker for finished works. The default covers both
    /// "Finalizada" and "Finalizado".
    pub finished: String,
}

impl Default for StatusMarkers {
    fn default() -> Self {
        Self {
            in_progress: "en ejecución".to_string(),
            finished: "finaliza".to_string(),
        }
    }
}

impl StatusMarkers {
    /// Whether a status text marks a work in execution.
    #[must_use]
    pub fn is_in_progress(&self, status: Option<&str>) -> bool {
        contains_ignore_case(status, &self.in_progress)
    }

    /// Whether a status text marks a finished work.
    #[must_use]
    pub fn is_finished(&self, status: Option<&str>) -> bool {
        contains_ignore_case(status, &self.finished)
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

/// Summary statistics of a filtered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiSummary {
    /// Number of projects.
    pub count: usize,
    /// Sum of amounts, missing amounts counted as zero.
    pub total_amount: f64,
    /// Projects whose status matches the in-progress marker.
    pub in_progress_count: usize,
    /// Projects whose status matches the finished marker.
    pub finished_count: usize,
}

/// Compute the KPI summary.
///
/// The two status buckets are independent: a status matching both markers
/// counts in both, one matching neither counts in none.
#[must_use]
pub fn aggregate(filtered: &ProjectCollection, markers: &StatusMarkers) -> KpiSummary {
    filtered
        .iter()
        .fold(KpiSummary::default(), |mut summary, project| {
            summary.count += 1;
            summary.total_amount += project.amount_or_zero();
            if markers.is_in_progress(project.status()) {
                summary.in_progress_count += 1;
            }
            if markers.is_finished(project.status()) {
                summary.finished_count += 1;
            }
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::Project;

    fn project(status: Option<&str>, amount: Option<f64>) -> Project {
        Project {
            status: status.map(str::to_string),
            amount,
            ..Project::default()
        }
    }

    #[test]
    fn test_empty_collection() {
        let summary = aggregate(&ProjectCollection::default(), &StatusMarkers::default());
        assert_eq!(summary, KpiSummary::default());
    }

    #[test]
    fn test_missing_amount_counts_as_zero() {
        let collection = ProjectCollection::new(vec![
            project(None, Some(1000.0)),
            project(None, None),
        ]);
        let summary = aggregate(&collection, &StatusMarkers::default());

        assert_eq!(summary.count, 2);
        assert!((summary.total_amount - 1000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_status_buckets_case_insensitive() {
        let collection = ProjectCollection::new(vec![
            project(Some("EN EJECUCIÓN"), None),
            project(Some("Obra en ejecución (etapa 2)"), None),
            project(Some("Finalizada"), None),
            project(Some("finalizado"), None),
            project(Some("A licitar"), None),
            project(None, None),
        ]);
        let summary = aggregate(&collection, &StatusMarkers::default());

        assert_eq!(summary.count, 6);
        assert_eq!(summary.in_progress_count, 2);
        assert_eq!(summary.finished_count, 2);
    }

    #[test]
    fn test_status_buckets_are_not_exclusive() {
        let collection = ProjectCollection::new(vec![project(
            Some("En ejecución - etapa 1 finalizada"),
            Some(10.0),
        )]);
        let summary = aggregate(&collection, &StatusMarkers::default());

        assert_eq!(summary.count, 1);
        assert_eq!(summary.in_progress_count, 1);
        assert_eq!(summary.finished_count, 1);
        assert_ne!(
            summary.count,
            summary.in_progress_count + summary.finished_count
        );
    }

    #[test]
    fn test_custom_markers() {
        let markers = StatusMarkers {
            in_progress: "In Execution".to_string(),
            finished: "Finished".to_string(),
        };
        let collection = ProjectCollection::new(vec![
            project(Some("in execution"), None),
            project(Some("FINISHED"), None),
        ]);
        let summary = aggregate(&collection, &markers);

        assert_eq!(summary.in_progress_count, 1);
        assert_eq!(summary.finished_count, 1);
    }

    #[test]
    fn test_negative_amounts_are_summed() {
        let collection = ProjectCollection::new(vec![
            project(None, Some(500.0)),
            project(None, Some(-200.0)),
        ]);
        let summary = aggregate(&collection, &StatusMarkers::default());
        assert!((summary.total_amount - 300.0).abs() < f64::EPSILON);
    }
}
