//! CanSight Common Library
//!
//! Shared types for the CanSight telemetry dashboard:
//!
//! - [`sample`] - Sample data model and the rolling [`SampleStore`]
//! - [`catalog`] - Metric descriptors and the default controller catalog
//! - [`serialization`] - JSON/CBOR encoding and history decoding
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod sample;
pub mod serialization;

// Re-export commonly used types at the crate root
pub use catalog::{
    GROUP_MEASUREMENT, GROUP_STATUS, GROUP_TEMPERATURE, MetricDescriptor, default_catalog,
    find_metric,
};
pub use config::{
    DashboardConfig, DisplayConfig, FeedConfig, FeedMode, LogFormat, LoggingConfig, load_config,
    parse_config,
};
pub use error::{Error, Result};
pub use sample::{DEFAULT_HISTORY_CAPACITY, FieldMap, FieldValue, Sample, SampleStore};
pub use serialization::{Format, decode, decode_auto, decode_history, encode};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
