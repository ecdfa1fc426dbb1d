//! Command-line interface for obrasmap.
//!
//! This module provides the CLI structure for the `obrasmap` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ConfigCommand, DashboardCommand, OptionsCommand, OutputFormat};

/// obrasmap - Explore public works on a map
///
/// Loads a GeoJSON dataset of public works, filters it by locality, agency,
/// type and name, and prints the resulting indicators, charts, map summary
/// and table.
#[derive(Debug, Parser)]
#[command(name = "obrasmap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the dataset and print the filtered dashboard
    Dashboard(DashboardCommand),

    /// List the values each filter accepts
    Options(OptionsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use obrasmap_core::Selection;

    fn cli(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            verbose,
            quiet,
            command: Command::Config(ConfigCommand::Path),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "obrasmap");
    }

    #[test]
    fn test_verbosity() {
        use crate::logging::Verbosity;

        assert_eq!(cli(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(3, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dashboard_defaults() {
        let cli = Cli::try_parse_from(["obrasmap", "dashboard"]).unwrap();
        let Command::Dashboard(cmd) = cli.command else {
            panic!("expected dashboard command");
        };
        assert!(cmd.criteria().is_unconstrained());
        assert_eq!(cmd.limit, 50);
        assert_eq!(cmd.format, OutputFormat::Plain);
        assert!(cmd.source.is_none());
    }

    #[test]
    fn test_parse_dashboard_filters() {
        let args = [
            "obrasmap",
            "dashboard",
            "--locality",
            "Mar del Plata",
            "--type",
            "Puentes",
            "--name",
            "arroyo",
            "--format",
            "json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Dashboard(cmd) = cli.command else {
            panic!("expected dashboard command");
        };
        let criteria = cmd.criteria();
        let locality = Selection::Only("Mar del Plata".to_string());
        assert_eq!(criteria.locality, locality);
        assert_eq!(criteria.kind, Selection::Only("Puentes".to_string()));
        assert!(criteria.agency.is_all());
        assert_eq!(criteria.name_query, "arroyo");
        assert_eq!(cmd.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_options() {
        let cli = Cli::try_parse_from(["obrasmap", "options", "--json"]).unwrap();
        let Command::Options(cmd) = cli.command else {
            panic!("expected options command");
        };
        assert!(cmd.json);
    }

    #[test]
    fn test_parse_config_validate() {
        let args = [
            "obrasmap",
            "config",
            "validate",
            "--file",
            "/tmp/obrasmap.toml",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { file: Some(_) })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let args = ["obrasmap", "-c", "/custom/config.toml", "options"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(["obrasmap", "-vv", "options"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(["obrasmap", "-q", "options"]).unwrap();
        assert!(cli.quiet);
    }
}
