//! Flatten a block's data into editable-field descriptors.

use blocklib_core::model::EditableField;
use serde_json::{Map, Value};

use crate::classify::Classifier;

/// Path prefix of descriptors computed from a block's `data`.
pub const ROOT_PREFIX: &str = "data";

/// Editable fields of a block's `data`, addressed from `data`.
pub fn compute_editable_fields(data: &Value) -> Vec<EditableField> {
    analyze_block_structure(data, ROOT_PREFIX)
}

/// Editable fields of `data` with paths under `prefix`, using the default
/// rule chain.
pub fn analyze_block_structure(data: &Value, prefix: &str) -> Vec<EditableField> {
    crate::classify::with_default(|c| c.walk(data, prefix))
}

impl Classifier {
    /// Depth-first walk in object-key order.
    ///
    /// Objects no rule claims are recursed into. Arrays are never recursed per
    /// element; the array rule turns a whole list into one descriptor.
    pub fn walk(&self, data: &Value, prefix: &str) -> Vec<EditableField> {
        let mut out = Vec::new();
        if let Value::Object(map) = data {
            self.walk_object(map, prefix, &mut out);
        }
        out
    }

    fn walk_object(&self, map: &Map<String, Value>, prefix: &str, out: &mut Vec<EditableField>) {
        for (key, value) in map {
            let path = join_path(prefix, key);
            if let Some(field) = self.classify(key, value, &path) {
                out.push(field);
            } else if let Value::Object(nested) = value {
                self.walk_object(nested, &path, out);
            }
        }
    }
}

pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
