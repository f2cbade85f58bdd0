//! Shared formatting utilities for the CanSight views.

use chrono::{DateTime, Local};

/// Format a sample's ISO-8601 timestamp as local wall-clock time.
///
/// Timestamps that do not parse as RFC 3339 are shown verbatim.
pub fn format_sample_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(time) => time.with_timezone(&Local).format("%H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

/// Format a sample count, e.g. "1 sample", "42 samples".
pub fn format_sample_count(count: usize) -> String {
    if count == 1 {
        "1 sample".to_string()
    } else {
        format!("{} samples", count)
    }
}
