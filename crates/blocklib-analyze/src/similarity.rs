//! Shallow structural similarity between blocks.
//!
//! Only the top-level keys of `data` are compared; values are ignored. Cheap
//! and explainable, meant for library deduplication and nothing else.

use std::collections::HashSet;

use blocklib_core::model::Block;

/// Minimum score for two blocks with the same `type` and `variant`.
pub const IDENTITY_FLOOR: f64 = 0.9;

/// Similarity in `[0, 1]`.
///
/// Jaccard index of the top-level `data` key sets (0 when both are empty),
/// raised to [`IDENTITY_FLOOR`] when `type` and `variant` match exactly.
pub fn similarity(a: &Block, b: &Block) -> f64 {
    let jaccard = key_jaccard(a, b);
    if a.kind == b.kind && a.variant == b.variant {
        jaccard.max(IDENTITY_FLOOR)
    } else {
        jaccard
    }
}

/// Jaccard index of the top-level `data` key sets.
pub fn key_jaccard(a: &Block, b: &Block) -> f64 {
    let keys_a: HashSet<&str> = a.data_keys().collect();
    let keys_b: HashSet<&str> = b.data_keys().collect();

    let union = keys_a.union(&keys_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = keys_a.intersection(&keys_b).count();
    intersection as f64 / union as f64
}
