//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use obrasmap_core::{FilterCriteria, Selection, ALL};

/// Dashboard command arguments.
///
/// The filter flags take the same values as the dashboard's controls:
/// `all` leaves the dimension unconstrained.
#[derive(Debug, Args)]
pub struct DashboardCommand {
    /// Show only works in this locality
    #[arg(short, long, default_value = ALL)]
    pub locality: String,

    /// Show only works run by this agency
    #[arg(short, long, default_value = ALL)]
    pub agency: String,

    /// Show only works of this type
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = ALL)]
    pub kind: String,

    /// Case-insensitive substring of the work name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Maximum number of table rows to print
    #[arg(long, default_value = "50")]
    pub limit: usize,

    /// Load the dataset from this path or URL instead of the configured one
    #[arg(short, long, value_name = "PATH_OR_URL")]
    pub source: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

impl DashboardCommand {
    /// The criteria selected on the command line.
    #[must_use]
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            locality: Selection::from_control(&self.locality),
            agency: Selection::from_control(&self.agency),
            kind: Selection::from_control(&self.kind),
            name_query: self.name.clone(),
        }
    }
}

/// Options command arguments.
#[derive(Debug, Args)]
pub struct OptionsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Load the dataset from this path or URL instead of the configured one
    #[arg(short, long, value_name = "PATH_OR_URL")]
    pub source: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard_command() -> DashboardCommand {
        DashboardCommand {
            locality: ALL.to_string(),
            agency: ALL.to_string(),
            kind: ALL.to_string(),
            name: String::new(),
            limit: 50,
            source: None,
            format: OutputFormat::Plain,
        }
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_default_criteria_are_unconstrained() {
        assert!(dashboard_command().criteria().is_unconstrained());
    }

    #[test]
    fn test_criteria_from_flags() {
        let cmd = DashboardCommand {
            locality: "Batán".to_string(),
            kind: "Pavimento".to_string(),
            name: "barrio".to_string(),
            ..dashboard_command()
        };
        let criteria = cmd.criteria();

        assert_eq!(criteria.locality, Selection::Only("Batán".to_string()));
        assert!(criteria.agency.is_all());
        assert_eq!(criteria.kind, Selection::Only("Pavimento".to_string()));
        assert_eq!(criteria.name_query, "barrio");
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_output_format_debug() {
        let format = OutputFormat::Json;
        let debug_str = format!("{format:?}");
        assert_eq!(debug_str, "Json");
    }
}
