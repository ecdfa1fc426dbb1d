//! The filter model: what the user currently selected.

use serde::{Deserialize, Serialize};

/// Control value meaning "no constraint on this dimension".
pub const ALL: &str = "all";

/// A selection on one exact-match dimension (locality, agency or type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Every value matches.
    #[default]
    All,
    /// Only this exact value matches.
    Only(String),
}

impl Selection {
    /// Build a selection from a control's current value.
    #[must_use]
    pub fn from_control(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// The value a control shows for this selection.
    #[must_use]
    pub fn as_control_value(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(value) => value,
        }
    }

    /// Whether a project's value passes this selection.
    ///
    /// Comparison is exact and case-sensitive; a missing value never
    /// passes a concrete selection.
    #[must_use]
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => value == Some(selected.as_str()),
        }
    }

    /// Whether this is the unconstrained selection.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_control_value())
    }
}

/// The four filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Locality selection.
    pub locality: Selection,
    /// Agency selection.
    pub agency: Selection,
    /// Type-of-work selection.
    pub kind: Selection,
    /// Name substring, possibly empty.
    pub name_query: String,
}

impl FilterCriteria {
    /// Criteria that match every project.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the locality selection.
    #[must_use]
    pub fn with_locality(mut self, locality: impl Into<String>) -> Self {
        self.locality = Selection::from_control(&locality.into());
        self
    }

    /// Set the agency selection.
    #[must_use]
    pub fn with_agency(mut self, agency: impl Into<String>) -> Self {
        self.agency = Selection::from_control(&agency.into());
        self
    }

    /// Set the type selection.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Selection::from_control(&kind.into());
        self
    }

    /// Set the name query.
    #[must_use]
    pub fn with_name_query(mut self, query: impl Into<String>) -> Self {
        self.name_query = query.into();
        self
    }

    /// The name query trimmed and lowercased, or `None` when it is blank.
    #[must_use]
    pub fn normalized_query(&self) -> Option<String> {
        let trimmed = self.name_query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Whether no dimension is constrained.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.locality.is_all()
            && self.agency.is_all()
            && self.kind.is_all()
            && self.normalized_query().is_none()
    }
}
