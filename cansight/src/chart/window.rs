//! Windowing and value extraction.

use cansight_common::{FieldValue, MetricDescriptor, Sample};

use super::format::to_fixed;

/// Maximum number of samples drawn by one chart.
pub const WINDOW_CAP: usize = 50;

/// A metric value read from one sample, remembering where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A numeric field.
    Number(f64),
    /// A boolean status flag.
    Flag(bool),
    /// Group or field absent (or not plottable).
    Missing,
}

impl Reading {
    /// Read `groups[metric.group][metric.key]` from a sample.
    pub fn from_sample(sample: &Sample, metric: &MetricDescriptor) -> Self {
        match sample.field(&metric.group, &metric.key) {
            Some(FieldValue::Number(v)) if v.is_finite() => Reading::Number(*v),
            Some(FieldValue::Flag(b)) => Reading::Flag(*b),
            _ => Reading::Missing,
        }
    }

    /// Numeric value used for plotting: flags are 1/0, missing values 0.
    pub fn value(&self) -> f64 {
        match self {
            Reading::Number(v) => *v,
            Reading::Flag(true) => 1.0,
            Reading::Flag(false) => 0.0,
            Reading::Missing => 0.0,
        }
    }

    /// Tooltip representation: ON/OFF for flags, two decimals otherwise.
    pub fn display(&self) -> String {
        match self {
            Reading::Flag(true) => "ON".to_string(),
            Reading::Flag(false) => "OFF".to_string(),
            other => to_fixed(other.value(), 2),
        }
    }
}

/// One windowed sample projected onto the requested metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    /// Position within the window (0 = oldest).
    pub index: usize,
    /// Timestamp of the source sample.
    pub timestamp: String,
    /// One reading per requested metric, in request order.
    pub readings: Vec<Reading>,
}

/// The trailing window of samples, projected onto a list of metrics.
#[derive(Debug, Clone)]
pub struct Window<'a> {
    metrics: &'a [MetricDescriptor],
    points: Vec<DataPoint>,
}

impl<'a> Window<'a> {
    pub fn metrics(&self) -> &'a [MetricDescriptor] {
        self.metrics
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Plot values of the metric at `metric_index`, oldest first.
    pub fn values(&self, metric_index: usize) -> impl Iterator<Item = f64> + '_ {
        self.points
            .iter()
            .filter_map(move |p| p.readings.get(metric_index).map(Reading::value))
    }

    /// Reading of the metric with the given key at a window index.
    pub fn reading(&self, index: usize, key: &str) -> Option<Reading> {
        let metric_index = self.metrics.iter().position(|m| m.key == key)?;
        self.point(index)?.readings.get(metric_index).copied()
    }
}

/// Take the most recent [`WINDOW_CAP`] samples and project the metrics.
///
/// The window is empty when there are no samples or no metrics.
pub fn extract<'a>(samples: &[Sample], metrics: &'a [MetricDescriptor]) -> Window<'a> {
    if metrics.is_empty() {
        return Window {
            metrics,
            points: Vec::new(),
        };
    }

    let start = samples.len().saturating_sub(WINDOW_CAP);
    let points = samples[start..]
        .iter()
        .enumerate()
        .map(|(index, sample)| DataPoint {
            index,
            timestamp: sample.timestamp.clone(),
            readings: metrics
                .iter()
                .map(|metric| Reading::from_sample(sample, metric))
                .collect(),
        })
        .collect();

    Window { metrics, points }
}
