//! Logging setup for the Frontier runtime.
//!
//! The application installs a `tracing` subscriber once configuration has
//! been loaded, reading the `LOG_*` keys through [`LoggingConfig`]. Events
//! emitted before that point (configuration loading itself) are dropped
//! unless the host installed its own subscriber first.
//!
//! # Configuration-Based Initialization
//!
//! ```rust,ignore
//! use frontier_runtime::config::{ConfigLoader, LoggingConfig};
//! use frontier_runtime::logging;
//!
//! let store = ConfigLoader::new().config_dir("/srv/site/config").load()?;
//! logging::init_from_config(&LoggingConfig::from_store(&store)?);
//! ```
//!
//! # Manual Initialization
//!
//! ```rust,ignore
//! use frontier_runtime::logging::LoggingBuilder;
//!
//! LoggingBuilder::new()
//!     .with_level(tracing::Level::DEBUG)
//!     .with_thread_ids(true)
//!     .try_init()?;
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig};

/// File name used when `LOG_FILE` names a directory.
const DEFAULT_LOG_FILE: &str = "frontier.log";

/// Initializes logging from a [`LoggingConfig`].
///
/// A subscriber that is already installed is left in place.
pub fn init_from_config(config: &LoggingConfig) {
    let _ = LoggingBuilder::from_config(config).try_init();
}

// =============================================================================
// LoggingBuilder
// =============================================================================

/// A builder for configuring logging.
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    directives: Vec<String>,
    level: Option<tracing::Level>,
    format: LogFormat,
    output: LogOutput,
    file_path: Option<PathBuf>,
    with_thread_ids: bool,
    with_span_close: bool,
}

impl LoggingBuilder {
    /// Creates a builder writing compact lines to stderr.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from a [`LoggingConfig`].
    pub fn from_config(config: &LoggingConfig) -> Self {
        let mut builder = Self::new()
            .with_level(config.level.to_tracing_level())
            .format(config.format)
            .output(config.output)
            .with_thread_ids(config.thread_ids)
            .with_span_close(config.span_close);
        builder.file_path.clone_from(&config.file_path);

        for (target, level) in &config.filters {
            builder
                .directives
                .push(format!("{}={}", target, level.as_str()));
        }

        builder
    }

    /// Sets the global log level.
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Sets the output format.
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the output destination.
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Includes thread IDs in log output.
    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.with_thread_ids = enabled;
        self
    }

    /// Logs an event with timing when a span closes, such as `request`.
    pub fn with_span_close(mut self, enabled: bool) -> Self {
        self.with_span_close = enabled;
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base_filter = self
            .level
            .unwrap_or(tracing::Level::INFO)
            .to_string()
            .to_lowercase();

        // RUST_LOG takes precedence over the configured level
        let mut filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base_filter));

        for directive in &self.directives {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }

        filter
    }

    fn span_events(&self) -> FmtSpan {
        if self.with_span_close {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn make_writer(&self) -> BoxMakeWriter {
        match (self.output, self.file_path.as_deref()) {
            (LogOutput::Stdout, _) => BoxMakeWriter::new(std::io::stdout),
            (LogOutput::File, Some(path)) => {
                let (dir, file) = split_log_path(path);
                BoxMakeWriter::new(tracing_appender::rolling::never(dir, file))
            }
            // Validation rejects file output without a path; stderr is the fallback
            _ => BoxMakeWriter::new(std::io::stderr),
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_writer(self.make_writer())
            .with_span_events(self.span_events())
            .with_thread_ids(self.with_thread_ids);

        match self.format {
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
            #[cfg(not(feature = "json-log"))]
            LogFormat::Json => layer.compact().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
        }
    }

    /// Tries to initialize the logging system.
    ///
    /// Fails if a global subscriber is already installed.
    pub fn try_init(self) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(self.build_filter())
            .try_init()
    }
}

/// Splits a log path into the appender's directory and file name.
fn split_log_path(path: &Path) -> (&Path, &OsStr) {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file = path
        .file_name()
        .unwrap_or_else(|| OsStr::new(DEFAULT_LOG_FILE));
    (dir, file)
}
