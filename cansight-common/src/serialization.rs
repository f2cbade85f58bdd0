use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Error, Result};
use crate::sample::Sample;

/// Serialization format for sample data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON format (what the controller gateway emits).
    #[default]
    Json,

    /// CBOR format (compact binary recordings).
    Cbor,
}

impl Format {
    /// Get the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Cbor => "application/cbor",
        }
    }
}

/// Encode a value to bytes using the specified format.
pub fn encode<T: Serialize>(value: &T, format: Format) -> Result<Vec<u8>> {
    match format {
        Format::Json => serde_json::to_vec(value).map_err(Error::from),
        Format::Cbor => {
            let mut buf = Vec::new();
            ciborium::into_writer(value, &mut buf)?;
            Ok(buf)
        }
    }
}

/// Decode bytes to a value using the specified format.
pub fn decode<T: DeserializeOwned>(data: &[u8], format: Format) -> Result<T> {
    match format {
        Format::Json => serde_json::from_slice(data).map_err(Error::from),
        Format::Cbor => ciborium::from_reader(data).map_err(|e| Error::Cbor(e.to_string())),
    }
}

/// Try to auto-detect the format from the data.
///
/// Returns `Json` if the first non-whitespace byte is `{` or `[`, otherwise `Cbor`.
pub fn detect_format(data: &[u8]) -> Format {
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') | Some(b'[') => Format::Json,
        _ => Format::Cbor,
    }
}

/// Decode bytes, auto-detecting the format.
pub fn decode_auto<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    let format = detect_format(data);
    decode(data, format)
}

/// Decode a recorded history: an array of samples, oldest first.
///
/// A single sample object is accepted as a one-element history.
pub fn decode_history(data: &[u8]) -> Result<Vec<Sample>> {
    let samples = match decode_auto::<Vec<Sample>>(data) {
        Ok(samples) => samples,
        Err(list_err) => decode_auto::<Sample>(data)
            .map(|sample| vec![sample])
            .map_err(|_| list_err)?,
    };

    tracing::debug!(
        format = detect_format(data).mime_type(),
        samples = samples.len(),
        "Decoded history"
    );

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::FieldValue;

    fn sample() -> Sample {
        Sample::new("2024-05-01T12:00:00.000Z")
            .with_field("measurement617", "DcBusVolt", 350.7)
            .with_field("status615", "Brake", true)
    }

    #[test]
    fn test_cbor_preserves_groups() {
        let encoded = encode(&sample(), Format::Cbor).unwrap();
        let decoded: Sample = decode(&encoded, Format::Cbor).unwrap();

        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(detect_format(b"{\"key\": \"value\"}"), Format::Json);
        assert_eq!(detect_format(b"  \n[1, 2, 3]"), Format::Json);
        assert_eq!(detect_format(b"\xa1\x63key\x65value"), Format::Cbor);
    }

    #[test]
    fn test_decode_history_json_array() {
        let data = br#"[
            {"timestamp": "t0", "measurement617": {"DcBusVolt": 300}},
            {"timestamp": "t1", "measurement617": {"DcBusVolt": 350}}
        ]"#;

        let history = decode_history(data).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].timestamp, "t1");
        assert_eq!(
            history[1].field("measurement617", "DcBusVolt"),
            Some(&FieldValue::Number(350.0))
        );
    }

    #[test]
    fn test_decode_history_single_object() {
        let data = br#"{"timestamp": "t0", "status615": {"Brake": false}}"#;
        let history = decode_history(data).unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_decode_history_cbor() {
        let encoded = encode(&vec![sample(), sample()], Format::Cbor).unwrap();
        let history = decode_history(&encoded).unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_decode_history_rejects_garbage() {
        assert!(decode_history(b"[1, 2, 3]").is_err());
    }
}
