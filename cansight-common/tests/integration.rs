//! Integration tests for cansight-common library.

use cansight_common::{
    DashboardConfig, FeedMode, FieldValue, Format, Sample, SampleStore, decode_history, encode,
    load_config,
};

fn recorded_history(count: usize) -> Vec<Sample> {
    (0..count)
        .map(|i| {
            Sample::new(format!("2024-05-01T12:00:{:02}.000Z", i % 60))
                .with_field("measurement617", "DcBusVolt", 300.0 + i as f64)
                .with_field("status615", "Brake", i % 2 == 0)
        })
        .collect()
}

#[test]
fn test_history_file_into_store() {
    let history = recorded_history(120);
    let bytes = encode(&history, Format::Json).expect("JSON encode failed");

    let decoded = decode_history(&bytes).expect("history decode failed");
    assert_eq!(decoded.len(), 120);

    let mut store = SampleStore::default();
    for sample in decoded {
        store.push(sample);
    }

    // The store keeps the most recent 100 samples.
    assert_eq!(store.len(), 100);
    assert_eq!(
        store.as_slice()[0].field("measurement617", "DcBusVolt"),
        Some(&FieldValue::Number(320.0))
    );
    assert_eq!(
        store.latest().and_then(|s| s.field("status615", "Brake")),
        Some(&FieldValue::Flag(false))
    );
}

#[test]
fn test_cbor_history_matches_json_history() {
    let history = recorded_history(5);
    let json = encode(&history, Format::Json).expect("JSON encode failed");
    let cbor = encode(&history, Format::Cbor).expect("CBOR encode failed");

    assert_eq!(
        decode_history(&json).expect("JSON decode failed"),
        decode_history(&cbor).expect("CBOR decode failed")
    );
}

#[test]
fn test_load_config_file() {
    let path = std::env::temp_dir().join(format!("cansight-config-{}.json5", std::process::id()));
    std::fs::write(
        &path,
        r#"{
            // Replay a recorded drive
            feed: { mode: "replay", path: "drive.json", interval_ms: 100 },
            history_capacity: 50,
        }"#,
    )
    .expect("write config");

    let config: DashboardConfig = load_config(&path).expect("load config");
    let _ = std::fs::remove_file(&path);

    assert_eq!(config.feed.mode, FeedMode::Replay);
    assert_eq!(config.history_capacity, 50);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_config_missing_file() {
    let result = load_config::<DashboardConfig>("/nonexistent/cansight.json5");
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
}
