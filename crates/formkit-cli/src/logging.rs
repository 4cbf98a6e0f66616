//! Logging setup for the `formkit` binary.
//!
//! Library crates only emit `tracing` events: `debug` for dirty-check and
//! classification decisions, `trace` for single diff entries and applied
//! normalization rules. This module installs the subscriber that prints them.
//!
//! `RUST_LOG` wins over the default level unless `-v`/`-q` or `--log-level`
//! was given.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Crates whose events follow the configured level; everything else stays at
/// `warn`.
const OWN_CRATES: [&str; 5] = [
    "formkit_cli",
    "formkit_diff",
    "formkit_form",
    "formkit_model",
    "formkit_normalize",
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level for formkit crates.
    pub level_filter: LevelFilter,
    /// Whether `RUST_LOG` may replace `level_filter`.
    pub use_env_filter: bool,
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event, with timestamps.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// `EnvFilter` directives for the configured level.
    pub fn directives(&self) -> String {
        let level = self.level_filter.to_string().to_lowercase();
        std::iter::once("warn".to_string())
            .chain(OWN_CRATES.iter().map(|krate| format!("{krate}={level}")))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Module targets are shown once the output is detailed enough to need them.
    fn with_target(&self) -> bool {
        self.level_filter >= LevelFilter::DEBUG
    }
}

/// Install the global subscriber. Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    let layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            fmt_layer(config, Mutex::new(file))
        }
        None => fmt_layer(config, io::stderr),
    };
    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter(config))
        .init();
    Ok(())
}

fn fmt_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let with_target = config.with_target();
    match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(writer)
            .with_target(with_target)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .without_time()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(with_target)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .without_time()
            .with_writer(writer)
            .with_ansi(config.with_ansi)
            .with_target(with_target)
            .boxed(),
    }
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(config.directives())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_own_crates() {
        let config = LogConfig {
            level_filter: LevelFilter::DEBUG,
            ..LogConfig::default()
        };
        let directives = config.directives();
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("formkit_diff=debug"));
        assert!(directives.contains("formkit_normalize=debug"));
        assert_eq!(directives.split(',').count(), 1 + OWN_CRATES.len());
    }

    #[test]
    fn targets_only_at_debug_and_above() {
        let quiet = LogConfig::default();
        let verbose = LogConfig {
            level_filter: LevelFilter::TRACE,
            ..LogConfig::default()
        };
        assert!(!quiet.with_target());
        assert!(verbose.with_target());
    }
}
