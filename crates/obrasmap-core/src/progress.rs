//! Progress-bar policy shared by every view that shows progress.

use serde::Serialize;

use crate::format::{format_fixed, round_half_away, NumberLocale};

/// How a project's progress is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProgressDisplay {
    /// Progress was reported.
    Reported {
        /// Percentage clamped to `0..=100` and rounded to two decimals.
        percent: f64,
    },
    /// Progress is absent, unparsable or negative.
    NotReported,
}

impl ProgressDisplay {
    /// Apply the policy to a raw progress value.
    ///
    /// Values `>= 0` are clamped to 100 and rounded to two decimals; anything
    /// else is not reported.
    #[must_use]
    pub fn from_value(progress: Option<f64>) -> Self {
        match progress {
            Some(value) if value.is_finite() && value >= 0.0 => Self::Reported {
                percent: round_half_away(value.min(100.0), 2),
            },
            _ => Self::NotReported,
        }
    }

    /// Width of the progress bar in percent, if a bar is drawn.
    #[must_use]
    pub fn bar_width(&self) -> Option<f64> {
        match self {
            Self::Reported { percent } => Some(*percent),
            Self::NotReported => None,
        }
    }

    /// Text shown next to (or instead of) the bar.
    #[must_use]
    pub fn label(&self, locale: &NumberLocale, not_reported: &str) -> String {
        match self {
            Self::Reported { percent } => format!("{}%", format_fixed(*percent, 2, locale)),
            Self::NotReported => not_reported.to_string(),
        }
    }
}
