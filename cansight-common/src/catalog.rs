//! Metric descriptors and the default motor-controller catalog.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Group holding the 0x615 status flags.
pub const GROUP_STATUS: &str = "status615";
/// Group holding the 0x616 temperatures.
pub const GROUP_TEMPERATURE: &str = "temp616";
/// Group holding the 0x617 electrical measurements.
pub const GROUP_MEASUREMENT: &str = "measurement617";

/// A plottable metric: one field of one sample group, with display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricDescriptor {
    /// Field name inside the group; unique within a catalog.
    pub key: String,

    /// Human-readable label.
    pub label: String,

    /// Sample group the field is read from.
    pub group: String,

    /// Styling token handed to the drawing backend untouched (e.g. "#f59e0b").
    pub color: String,

    /// Unit suffix; empty for flags.
    #[serde(default)]
    pub unit: String,
}

impl MetricDescriptor {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        group: impl Into<String>,
        color: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: group.into(),
            color: color.into(),
            unit: unit.into(),
        }
    }
}

/// The default catalog in display order.
pub fn default_catalog() -> Vec<MetricDescriptor> {
    let entries: [(&str, &str, &str, &str, &str); 15] = [
        ("CtlrTemp1", "Controller Temp 1", GROUP_TEMPERATURE, "#3b82f6", "°C"),
        ("CtlrTemp2", "Controller Temp 2", GROUP_TEMPERATURE, "#1d4ed8", "°C"),
        ("CtlrTemp", "Controller Temp Avg", GROUP_TEMPERATURE, "#2563eb", "°C"),
        ("MtrTemp", "Motor Temperature", GROUP_TEMPERATURE, "#ef4444", "°C"),
        ("AcCurrMeaRms", "AC Current RMS", GROUP_MEASUREMENT, "#22c55e", "A"),
        ("DcCurrEstd", "DC Current Est", GROUP_MEASUREMENT, "#16a34a", "A"),
        ("DcBusVolt", "DC Bus Voltage", GROUP_MEASUREMENT, "#f59e0b", "V"),
        ("Mtrspd", "Motor Speed", GROUP_MEASUREMENT, "#8b5cf6", "RPM"),
        ("ThrotVolt", "Throttle Voltage", GROUP_MEASUREMENT, "#06b6d4", "V"),
        ("LimpHomeMode", "Limp Home Mode", GROUP_STATUS, "#ef4444", ""),
        ("EcoPost", "Eco Mode", GROUP_STATUS, "#22c55e", ""),
        ("RegeMode", "Regen Mode", GROUP_STATUS, "#8b5cf6", ""),
        ("Forward", "Forward Gear", GROUP_STATUS, "#22c55e", ""),
        ("Reverse", "Reverse Gear", GROUP_STATUS, "#f59e0b", ""),
        ("Brake", "Brake Status", GROUP_STATUS, "#ef4444", ""),
    ];

    entries
        .into_iter()
        .map(|(key, label, group, color, unit)| {
            MetricDescriptor::new(key, label, group, color, unit)
        })
        .collect()
}

/// Find a metric by key.
pub fn find_metric<'a>(catalog: &'a [MetricDescriptor], key: &str) -> Option<&'a MetricDescriptor> {
    catalog.iter().find(|m| m.key == key)
}

/// Return the first key that appears more than once, if any.
pub fn duplicate_key(catalog: &[MetricDescriptor]) -> Option<&str> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .find(|m| !seen.insert(m.key.as_str()))
        .map(|m| m.key.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order_and_groups() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 15);
        assert_eq!(catalog[0].key, "CtlrTemp1");
        assert_eq!(catalog[14].key, "Brake");

        let volt = find_metric(&catalog, "DcBusVolt").unwrap();
        assert_eq!(volt.group, GROUP_MEASUREMENT);
        assert_eq!(volt.unit, "V");
        assert_eq!(volt.color, "#f59e0b");

        assert!(
            catalog
                .iter()
                .filter(|m| m.group == GROUP_STATUS)
                .all(|m| m.unit.is_empty())
        );
    }

    #[test]
    fn test_default_catalog_keys_unique() {
        assert_eq!(duplicate_key(&default_catalog()), None);
    }

    #[test]
    fn test_duplicate_key_detected() {
        let mut catalog = default_catalog();
        catalog.push(MetricDescriptor::new("Brake", "Brake again", GROUP_STATUS, "#fff", ""));
        assert_eq!(duplicate_key(&catalog), Some("Brake"));
    }
}
