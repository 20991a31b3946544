//! Telemetry and tracing utilities
//!
//! Installs a `tracing` subscriber for the CLI and for library users that do
//! not bring their own. Console output goes to stderr so that stdout stays
//! reserved for results.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ollama_dev::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::defaults;
use crate::error::TelemetryError;

type Result<T> = std::result::Result<T, TelemetryError>;
type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON with thread information
    Json,
    /// JSON with event fields flattened into the top-level object
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            other => Err(TelemetryError::InvalidSetting(format!(
                "Invalid log format: {other}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for the tracing subscriber
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriberConfig {
    /// Log level for this crate
    pub log_level: tracing::Level,
    /// Output format
    pub output_format: OutputFormat,
    /// Enable console (stderr) output
    pub enable_console: bool,
    /// Log file path (optional, appended to)
    pub log_file: Option<PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            enable_console: true,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    /// Create a new builder
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Create a debug configuration
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// Read `OLLAMA_DEV_LOG_LEVEL`, `OLLAMA_DEV_LOG_FORMAT` and `OLLAMA_DEV_LOG_FILE`
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(level) = std::env::var(defaults::env::LOG_LEVEL) {
            builder = builder.log_level_str(&level)?;
        }
        if let Ok(format) = std::env::var(defaults::env::LOG_FORMAT) {
            builder = builder.output_format(format.parse()?);
        }
        if let Ok(path) = std::env::var(defaults::env::LOG_FILE)
            && !path.trim().is_empty()
        {
            builder = builder.log_file(PathBuf::from(path));
        }

        Ok(builder.build())
    }

    fn filter_directive(&self) -> String {
        let level = self.log_level.as_str().to_lowercase();
        format!("ollama_dev={level}")
    }
}

/// Builder for [`SubscriberConfig`]
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    enable_console: Option<bool>,
    log_file: Option<PathBuf>,
}

impl SubscriberConfigBuilder {
    /// Set the log level
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string (trace, debug, info, warn, error)
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let parsed = level.trim().parse::<tracing::Level>().map_err(|_| {
            TelemetryError::InvalidSetting(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        self.log_level = Some(parsed);
        Ok(self)
    }

    /// Set the output format
    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Enable or disable console output
    pub fn enable_console(mut self, enable: bool) -> Self {
        self.enable_console = Some(enable);
        self
    }

    /// Set the log file path
    pub fn log_file(mut self, path: PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    /// Build the configuration
    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            enable_console: self.enable_console.unwrap_or(true),
            log_file: self.log_file,
        }
    }
}

fn format_layer<W>(format: OutputFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_target(true);
    match format {
        OutputFormat::Text => layer.with_ansi(ansi).boxed(),
        OutputFormat::Json => layer
            .json()
            .with_thread_ids(true)
            .with_thread_names(true)
            .boxed(),
        OutputFormat::JsonCompact => layer.json().flatten_event(true).boxed(),
    }
}

/// Output layers and level filter described by a [`SubscriberConfig`]
///
/// Opens the log file when one is configured; the returned guard flushes it
/// on drop.
fn build_layers(
    config: &SubscriberConfig,
) -> Result<(Vec<BoxedLayer>, EnvFilter, Option<WorkerGuard>)> {
    let filter = EnvFilter::try_new(config.filter_directive())
        .map_err(|e| TelemetryError::InvalidSetting(e.to_string()))?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    if config.enable_console {
        layers.push(format_layer(config.output_format, std::io::stderr, true));
    }

    let mut guard = None;
    if let Some(path) = &config.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let (writer, file_guard) = tracing_appender::non_blocking(file);
        layers.push(format_layer(config.output_format, writer, false));
        guard = Some(file_guard);
    }

    Ok((layers, filter, guard))
}

/// Initialize the tracing subscriber with the given configuration
///
/// ## Returns
///
/// - `Ok(Some(WorkerGuard))` when file logging is enabled. The guard must be
///   kept alive for the duration of the program or buffered lines are lost.
/// - `Ok(None)` otherwise, including when a global subscriber was already set.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let (layers, filter, guard) = build_layers(&config)?;

    match tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
    {
        Ok(()) => Ok(guard),
        Err(e) => {
            let error_msg = e.to_string();
            if error_msg.contains("global default trace dispatcher has already been set") {
                Ok(None)
            } else {
                Err(TelemetryError::Init(format!(
                    "Failed to initialize tracing: {error_msg}"
                )))
            }
        }
    }
}

/// Initialize the tracing subscriber with the default configuration
pub fn init_default() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::default())
}

/// Initialize the tracing subscriber from environment variables
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    init_subscriber(SubscriberConfig::from_env()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = SubscriberConfig::builder().build();
        assert_eq!(config, SubscriberConfig::default());
        assert_eq!(config.filter_directive(), "ollama_dev=info");
    }

    #[test]
    fn test_log_level_str() {
        let config = SubscriberConfig::builder()
            .log_level_str("DEBUG")
            .unwrap()
            .build();
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert_eq!(config.filter_directive(), "ollama_dev=debug");

        assert!(matches!(
            SubscriberConfig::builder().log_level_str("loud"),
            Err(TelemetryError::InvalidSetting(_))
        ));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(
            "JSON-Compact".parse::<OutputFormat>().unwrap(),
            OutputFormat::JsonCompact
        );
        assert_eq!(" text ".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_missing_log_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = SubscriberConfig::builder()
            .enable_console(false)
            .log_file(dir.path().join("missing").join("ollama-dev.log"))
            .build();
        assert!(matches!(
            build_layers(&config),
            Err(TelemetryError::LogFile(_))
        ));
    }

    #[test]
    fn test_file_layer_writes_filtered_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ollama-dev.log");
        let config = SubscriberConfig::builder()
            .enable_console(false)
            .output_format(OutputFormat::JsonCompact)
            .log_file(path.clone())
            .build();

        let (layers, filter, guard) = build_layers(&config).unwrap();
        assert_eq!(layers.len(), 1);
        let subscriber = tracing_subscriber::registry().with(layers).with(filter);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(model = "llama3.2", "listing models");
            tracing::debug!("below the configured level");
        });
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1, "{contents}");
        let event: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(event["message"], "listing models");
        assert_eq!(event["model"], "llama3.2");
        assert_eq!(event["level"], "INFO");
    }
}
