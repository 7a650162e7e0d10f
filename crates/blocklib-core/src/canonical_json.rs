//! Canonical JSON for template fingerprints.
//!
//! The workspace enables `serde_json/preserve_order`, so a `Map` remembers
//! insertion order and serializes in it. Two templates assembled with their
//! keys in a different order would then hash differently. Fingerprints go
//! through this module instead, which rebuilds every object with its keys in
//! lexicographic order. Array order is kept and output is minified.
//!
//! Canonical output is for hashing only. Templates shown to callers keep the
//! order their fields were discovered in.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Serialize `value` to canonical JSON bytes.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let sorted = sort_keys(serde_json::to_value(value)?);
    serde_json::to_vec(&sorted)
}

/// Serialize `value` to a canonical JSON string.
pub fn to_canonical_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let sorted = sort_keys(serde_json::to_value(value)?);
    serde_json::to_string(&sorted)
}

/// Rebuild objects, at every depth, with their keys in sorted order.
pub fn sort_keys(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> =
                map.into_iter().map(|(k, v)| (k, sort_keys(v))).collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        scalar => scalar,
    }
}
