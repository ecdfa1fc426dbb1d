//! Filter option lists derived from the loaded dataset.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::project::{Project, ProjectCollection};

/// The values offered by each filter control, sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Localities.
    pub localities: Vec<String>,
    /// Agencies.
    pub agencies: Vec<String>,
    /// Types of work.
    pub kinds: Vec<String>,
}

impl FilterOptions {
    /// Derive the option lists from the full dataset. Missing values are skipped.
    #[must_use]
    pub fn derive(all: &ProjectCollection) -> Self {
        Self {
            localities: unique_sorted(all, Project::locality),
            agencies: unique_sorted(all, Project::agency),
            kinds: unique_sorted(all, Project::kind),
        }
    }

    /// Whether every list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.localities.is_empty() && self.agencies.is_empty() && self.kinds.is_empty()
    }
}

fn unique_sorted(all: &ProjectCollection, field: fn(&Project) -> Option<&str>) -> Vec<String> {
    all.iter()
        .filter_map(field)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(locality: Option<&str>, agency: Option<&str>, kind: Option<&str>) -> Project {
        Project {
            locality: locality.map(str::to_string),
            agency: agency.map(str::to_string),
            kind: kind.map(str::to_string),
            ..Project::default()
        }
    }

    #[test]
    fn test_options_are_sorted_and_unique() {
        let all = ProjectCollection::new(vec![
            project(Some("Sierra de los Padres"), Some("OSSE"), Some("Cloacas")),
            project(Some("Batán"), Some("EMVIAL"), Some("Pavimento")),
            project(Some("Batán"), Some("OSSE"), None),
            project(None, None, Some("Cloacas")),
        ]);
        let options = FilterOptions::derive(&all);

        assert_eq!(options.localities, vec!["Batán", "Sierra de los Padres"]);
        assert_eq!(options.agencies, vec!["EMVIAL", "OSSE"]);
        assert_eq!(options.kinds, vec!["Cloacas", "Pavimento"]);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let forward = ProjectCollection::new(vec![
            project(Some("b"), None, None),
            project(Some("a"), None, None),
        ]);
        let backward = ProjectCollection::new(vec![
            project(Some("a"), None, None),
            project(Some("b"), None, None),
        ]);
        assert_eq!(
            FilterOptions::derive(&forward),
            FilterOptions::derive(&backward)
        );
    }

    #[test]
    fn test_empty_dataset() {
        let options = FilterOptions::derive(&ProjectCollection::default());
        assert!(options.is_empty());
    }
}
