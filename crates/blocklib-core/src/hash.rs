use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::canonical_json::to_canonical_json_bytes;

/// Compute an xxh64-style hash (hex) over UTF-8 bytes.
///
/// Implementation detail:
/// - Uses xxh3_64 (from `xxhash-rust`) for speed and stability.
/// - Returned as fixed-width 16-char lowercase hex.
pub fn xxh64_hex(input: &str) -> String {
    format!("{:016x}", xxh3_64(input.as_bytes()))
}

/// Deterministic library entry id for a `(type, variant_id)` pair.
///
/// Payload is `{type}\t{variant_id}`; the pair is the library's identity key,
/// so re-seeding or re-admitting the same component yields the same id.
pub fn entry_id(kind: &str, variant_id: &str) -> String {
    xxh64_hex(&format!("{kind}\t{variant_id}"))
}

/// Fingerprint of any serializable value over its canonical JSON form.
///
/// Key order does not affect the result.
pub fn fingerprint<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:016x}", xxh3_64(&bytes)))
}
