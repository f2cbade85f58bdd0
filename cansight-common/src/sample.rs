use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Default number of samples retained by a [`SampleStore`].
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Fields of one sample group (e.g. the decoded contents of one CAN frame).
pub type FieldMap = BTreeMap<String, FieldValue>;

/// One timestamped telemetry snapshot.
///
/// On the wire the groups sit next to the timestamp:
///
/// ```json
/// { "timestamp": "2024-05-01T12:00:00.000Z",
///   "temp616": { "MtrTemp": 55.2 },
///   "status615": { "Brake": true } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// ISO-8601 timestamp of the snapshot.
    pub timestamp: String,

    /// Sub-groups of named fields, keyed by group name.
    #[serde(flatten)]
    pub groups: BTreeMap<String, FieldMap>,
}

impl Sample {
    /// Create an empty sample with the given timestamp.
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            groups: BTreeMap::new(),
        }
    }

    /// Set a field, creating its group when needed.
    pub fn with_field(
        mut self,
        group: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        self.insert(group, field, value);
        self
    }

    /// Set a field in place, creating its group when needed.
    pub fn insert(
        &mut self,
        group: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) {
        self.groups
            .entry(group.into())
            .or_default()
            .insert(field.into(), value.into());
    }

    /// Look up `groups[group][field]`.
    pub fn field(&self, group: &str, field: &str) -> Option<&FieldValue> {
        self.groups.get(group).and_then(|fields| fields.get(field))
    }
}

/// A scalar field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Status flag.
    Flag(bool),

    /// Numeric measurement.
    Number(f64),

    /// Free-form text (not plottable).
    Text(String),

    /// Explicit null from the feed.
    Null,
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Flag(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

/// Append-only sample history with a rolling capacity.
///
/// The oldest sample is evicted once the capacity is exceeded.
#[derive(Debug, Clone)]
pub struct SampleStore {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SampleStore {
    /// Create a store retaining at most `capacity` samples (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
        self.samples.make_contiguous();
    }

    /// All retained samples, oldest first.
    pub fn as_slice(&self) -> &[Sample] {
        self.samples.as_slices().0
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SampleStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_wire_format() {
        let json = r#"{
            "timestamp": "2024-05-01T12:00:00.000Z",
            "status615": { "Brake": true, "Reverse": false },
            "temp616": { "MtrTemp": 55.2 },
            "measurement617": { "Mtrspd": 1800, "Note": "n/a", "ThrotVolt": null }
        }"#;

        let sample: Sample = serde_json::from_str(json).unwrap();

        assert_eq!(sample.timestamp, "2024-05-01T12:00:00.000Z");
        assert_eq!(sample.groups.len(), 3);
        assert_eq!(
            sample.field("status615", "Brake"),
            Some(&FieldValue::Flag(true))
        );
        assert_eq!(
            sample.field("temp616", "MtrTemp"),
            Some(&FieldValue::Number(55.2))
        );
        assert_eq!(
            sample.field("measurement617", "Mtrspd"),
            Some(&FieldValue::Number(1800.0))
        );
        assert_eq!(
            sample.field("measurement617", "Note"),
            Some(&FieldValue::Text("n/a".to_string()))
        );
        assert_eq!(
            sample.field("measurement617", "ThrotVolt"),
            Some(&FieldValue::Null)
        );
        assert_eq!(sample.field("missing", "Mtrspd"), None);
    }

    #[test]
    fn test_sample_builder() {
        let sample = Sample::new("t0")
            .with_field("measurement617", "DcBusVolt", 350.7)
            .with_field("status615", "Brake", true);

        assert_eq!(
            sample.field("measurement617", "DcBusVolt"),
            Some(&FieldValue::Number(350.7))
        );
        assert_eq!(
            sample.field("status615", "Brake"),
            Some(&FieldValue::Flag(true))
        );
    }

    #[test]
    fn test_store_evicts_oldest() {
        let mut store = SampleStore::with_capacity(3);
        for i in 0..5 {
            store.push(Sample::new(format!("t{}", i)));
        }

        assert_eq!(store.len(), 3);
        let timestamps: Vec<_> = store.as_slice().iter().map(|s| s.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["t2", "t3", "t4"]);
        assert_eq!(store.latest().map(|s| s.timestamp.as_str()), Some("t4"));
    }

    #[test]
    fn test_store_default_capacity() {
        let mut store = SampleStore::default();
        assert!(store.is_empty());
        assert_eq!(store.capacity(), DEFAULT_HISTORY_CAPACITY);

        for i in 0..150 {
            store.push(Sample::new(format!("t{}", i)));
        }
        assert_eq!(store.len(), 100);
        assert_eq!(store.as_slice().len(), 100);
        assert_eq!(store.as_slice()[0].timestamp, "t50");
    }

    #[test]
    fn test_store_zero_capacity_is_clamped() {
        let mut store = SampleStore::with_capacity(0);
        store.push(Sample::new("a"));
        store.push(Sample::new("b"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.as_slice()[0].timestamp, "b");
    }
}
