//! The filter engine.

use crate::criteria::FilterCriteria;
use crate::project::{Project, ProjectCollection};

/// Select the projects that satisfy every criterion, in their original order.
///
/// Locality, agency and type are exact matches; the name query is a
/// case-insensitive substring match on the trimmed query.
#[must_use]
pub fn filter_projects(all: &ProjectCollection, criteria: &FilterCriteria) -> ProjectCollection {
    let query = criteria.normalized_query();
    all.iter()
        .filter(|project| matches_criteria(project, criteria, query.as_deref()))
        .cloned()
        .collect()
}

fn matches_criteria(project: &Project, criteria: &FilterCriteria, query: Option<&str>) -> bool {
    criteria.locality.matches(project.locality())
        && criteria.agency.matches(project.agency())
        && criteria.kind.matches(project.kind())
        && query.map_or(true, |q| {
            project
                .name()
                .is_some_and(|name| name.to_lowercase().contains(q))
        })
}
