//! `obrasmap` - CLI for the public-works map dashboard
//!
//! This binary loads the configured dataset and prints the dashboard the
//! selected filters produce.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use obrasmap::cli::{Cli, Command, ConfigCommand, DashboardCommand, OptionsCommand, OutputFormat};
use obrasmap::report::{render_options, render_plain};
use obrasmap::{
    init_logging, recording_sinks, Config, Dashboard, DashboardSettings, DatasetLoader,
    DatasetSource, DefaultFetcher, Report, SharedReport,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        // Load failures were already logged and shown as a notice
        Err(e) if e.is_load_failure() => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Execute the command. Configuration is loaded only by the commands that
/// need it.
async fn run(cli: Cli) -> obrasmap::Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Dashboard(cmd) => {
            let config = Config::load_from(config_path)?;
            handle_dashboard(&config, &cmd).await
        }
        Command::Options(cmd) => {
            let config = Config::load_from(config_path)?;
            handle_options(&config, &cmd).await
        }
        Command::Config(cmd) => handle_config(config_path, cmd),
    }
}

/// Load the dataset into a dashboard wired to recording sinks.
async fn run_dashboard(
    config: &Config,
    source: Option<&str>,
    report: &SharedReport,
) -> obrasmap::Result<()> {
    let source = source.map_or_else(|| config.dataset_source(), DatasetSource::parse);
    let fetcher = DefaultFetcher::new(config.fetch_timeout())?;
    let loader = DatasetLoader::new(fetcher, config.properties.clone());

    let mut dashboard = Dashboard::new(DashboardSettings::from(config), recording_sinks(report));
    let started = dashboard.start(&loader, &source).await;

    // The notifier of a terminal host is stderr
    for notice in &report.borrow().notices {
        eprintln!("ERROR: {notice}");
    }
    started?;

    if let Some(dataset) = dashboard.dataset() {
        let mut report = report.borrow_mut();
        report.source = Some(dataset.source.clone());
        report.loaded_at = Some(dataset.loaded_at);
    }
    Ok(())
}

async fn handle_dashboard(config: &Config, cmd: &DashboardCommand) -> obrasmap::Result<()> {
    // The controls start out holding the command-line selection
    let report = Report::shared_with_selection(cmd.criteria());
    run_dashboard(config, cmd.source.as_deref(), &report).await?;

    let mut report = report.borrow_mut();
    // Notices already went to stderr
    report.notices.clear();
    match cmd.format {
        OutputFormat::Plain => print!("{}", render_plain(&report, cmd.limit)),
        OutputFormat::Json => {
            report.rows.truncate(cmd.limit);
            println!("{}", serde_json::to_string_pretty(&*report)?);
        }
    }
    Ok(())
}

async fn handle_options(config: &Config, cmd: &OptionsCommand) -> obrasmap::Result<()> {
    let report = Report::shared();
    run_dashboard(config, cmd.source.as_deref(), &report).await?;

    let report = report.borrow();
    let options = report.options.clone().unwrap_or_default();
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print!("{}", render_options(&options));
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> obrasmap::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Dataset]");
                println!("  Source:             {}", config.dataset.source);
                println!("  Timeout (secs):     {}", config.dataset.timeout_secs);
                println!();
                println!("[Properties]");
                let keys = &config.properties;
                println!("  Name:               {}", keys.name);
                println!("  Locality:           {}", keys.locality);
                println!("  Agency:             {}", keys.agency);
                println!("  Type:               {}", keys.kind);
                println!("  Status:             {}", keys.status);
                println!("  Amount:             {}", keys.amount);
                println!("  Progress:           {}", keys.progress);
                println!();
                println!("[Status]");
                println!("  In progress marker: {}", config.status.in_progress);
                println!("  Finished marker:    {}", config.status.finished);
                println!();
                println!("[Display]");
                let locale = &config.display.locale;
                println!("  Thousands sep.:     {:?}", locale.thousands_separator);
                println!("  Decimal sep.:       {:?}", locale.decimal_separator);
                println!("  Currency:           {}", locale.currency_symbol);
                println!(
                    "  Placeholder:        {}",
                    config.display.labels.placeholder
                );
                println!();
                println!("[Map]");
                println!(
                    "  Center:             {}, {}",
                    config.map.center_lat, config.map.center_lon
                );
                println!(
                    "  Zoom:               {} (max {})",
                    config.map.zoom, config.map.max_zoom
                );
                println!("  Tiles:              {}", config.map.tile_url);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::validate_file(&path)?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
