//! In-memory JSON helpers for the record types.
//!
//! The client decodes response bodies through [`from_json_slice`]; the string
//! variants exist for tests, benches and fuzz targets.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decodes a record from raw response bytes.
pub fn from_json_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Decodes a record from a JSON string.
pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(json)
}

/// Encodes a record in the same shape the archive serves it.
pub fn to_json_string<T: Serialize>(record: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}
