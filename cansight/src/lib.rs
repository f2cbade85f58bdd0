//! CanSight - live motor-controller telemetry charts.
//!
//! This library exposes the chart engine and the application components for
//! testing.

pub mod app;
pub mod chart;
pub mod cli;
pub mod demo;
pub mod message;
pub mod subscription;
pub mod view;

// Re-export commonly used types
pub use app::CanSight;
pub use message::{ChartId, Message};
