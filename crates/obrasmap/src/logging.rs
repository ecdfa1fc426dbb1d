//! Logging configuration for obrasmap.
//!
//! Diagnostics go to stderr through `tracing`, keeping stdout free for the
//! dashboard report.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events pass the default filter.
const LOG_TARGETS: [&str; 2] = ["obrasmap", "obrasmap_core"];

/// Verbosity level for logging output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and above.
    #[default]
    Normal,
    /// Dataset loading and recompute details.
    Verbose,
    /// Very verbose output (trace level).
    Trace,
}

impl Verbosity {
    /// The most detailed level shown.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directives enabling this level for the obrasmap crates only.
    #[must_use]
    pub fn directives(self) -> String {
        let level = self.level();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Build the event filter.
///
/// A non-empty, parsable `rust_log` wins over `verbosity`. An unparsable one
/// is reported on stderr and ignored.
#[must_use]
pub fn build_filter(verbosity: Verbosity, rust_log: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::new(verbosity.directives());
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid RUST_LOG {directives:?}: {e}");
            fallback()
        }),
        None => fallback(),
    }
}

/// Initialize the logging system.
///
/// Call once at startup. `RUST_LOG` takes precedence over `verbosity`.
///
/// # Examples
///
/// ```no_run
/// use obrasmap::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = build_filter(verbosity, rust_log.as_deref());

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false),
    );

    // A subscriber may already be installed
    let _ = subscriber.try_init();
}

/// Initialize logging for tests.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
