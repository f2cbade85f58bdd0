use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{MetricDescriptor, default_catalog, duplicate_key};
use crate::error::{Error, Result};
use crate::sample::DEFAULT_HISTORY_CAPACITY;

/// Where samples come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Simulated motor-controller data (default).
    #[default]
    Demo,
    /// Play back a recorded history file.
    Replay,
}

/// Sample feed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed mode: "demo" or "replay".
    #[serde(default)]
    pub mode: FeedMode,

    /// Delay between two samples, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Seed for the demo simulator (random when absent).
    #[serde(default)]
    pub seed: Option<u64>,

    /// History file for replay mode (JSON or CBOR array of samples).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_interval_ms() -> u64 {
    1000
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            mode: FeedMode::default(),
            interval_ms: default_interval_ms(),
            seed: None,
            path: None,
        }
    }
}

/// Window and pixel density settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Initial window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Initial window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Window scale factor applied by iced; charts size their viewport from it.
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f32,
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_window_height() -> f32 {
    900.0
}

fn default_scale_factor() -> f32 {
    1.0
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            scale_factor: default_scale_factor(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub display: DisplayConfig,

    /// Number of samples kept in memory.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Metrics offered by the graph views, in display order.
    #[serde(default = "default_catalog")]
    pub catalog: Vec<MetricDescriptor>,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            feed: FeedConfig::default(),
            display: DisplayConfig::default(),
            history_capacity: default_history_capacity(),
            catalog: default_catalog(),
        }
    }
}

impl DashboardConfig {
    /// Check the configuration for values the dashboard cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            return Err(Error::Config(
                "history_capacity must be at least 1".to_string(),
            ));
        }

        if self.feed.interval_ms == 0 {
            return Err(Error::Config(
                "feed.interval_ms must be greater than 0".to_string(),
            ));
        }

        if self.feed.mode == FeedMode::Replay && self.feed.path.is_none() {
            return Err(Error::Config(
                "feed.path is required in replay mode".to_string(),
            ));
        }

        if let Some(key) = duplicate_key(&self.catalog) {
            return Err(Error::Config(format!(
                "duplicate metric key '{}' in catalog",
                key
            )));
        }

        Ok(())
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}
