//! Template materialization, value extraction and hydration.
//!
//! Only a block's `data` subtree is ever rewritten; `type`, `variant` and any
//! other top-level keys select the renderer and are copied verbatim.
//!
//! Slot selection (see [`PlaceholderHint::for_value`]):
//! - non-empty strings and numbers become placeholders
//! - objects are recursed into, with paths relative to `data`
//! - arrays are kept whole so list editors see their real shape
//!
//! Round trip: for any block without placeholder-shaped strings,
//! `hydrate_template(&materialize_template(&b), &extract_values(&b)) == b`.

use blocklib_core::model::{Block, Template, ValueMap};
use serde_json::{Map, Value};

use crate::placeholder::{Placeholder, PlaceholderHint};
use crate::walk::join_path;

/// Replace every slot value in `block.data` with its placeholder.
pub fn materialize_template(block: &Block) -> Template {
    let mut out = block.clone();
    if let Value::Object(map) = &mut out.data {
        templatize_object(map, "");
    }
    Template::from_block(out)
}

fn templatize_object(map: &mut Map<String, Value>, path: &str) {
    for (key, value) in map.iter_mut() {
        let current = join_path(path, key);
        if let Value::Object(nested) = value {
            templatize_object(nested, &current);
        } else if let Some(hint) = PlaceholderHint::for_value(value) {
            *value = Value::String(Placeholder::new(current, hint).to_string());
        }
    }
}

/// The value behind every slot [`materialize_template`] would create, keyed
/// by placeholder key.
pub fn extract_values(block: &Block) -> ValueMap {
    let mut out = ValueMap::new();
    if let Value::Object(map) = &block.data {
        collect_object(map, "", &mut out);
    }
    out
}

fn collect_object(map: &Map<String, Value>, path: &str, out: &mut ValueMap) {
    for (key, value) in map {
        let current = join_path(path, key);
        if let Value::Object(nested) = value {
            collect_object(nested, &current, out);
        } else if let Some(hint) = PlaceholderHint::for_value(value) {
            out.insert(Placeholder::new(current, hint).key(), value.clone());
        }
    }
}

/// Build a new block from `template`, substituting placeholders found in
/// `values`.
///
/// Placeholders without a value stay literal. Map entries that match no
/// placeholder are ignored. Placeholders inside arrays are substituted too.
pub fn hydrate_template(template: &Template, values: &ValueMap) -> Block {
    let mut out = template.as_block().clone();
    hydrate_value(&mut out.data, values);
    out
}

fn hydrate_value(value: &mut Value, values: &ValueMap) {
    let replacement = match value {
        Value::String(s) => Placeholder::inner(s).and_then(|key| values.get(key)).cloned(),
        Value::Array(items) => {
            for item in items.iter_mut() {
                hydrate_value(item, values);
            }
            None
        }
        Value::Object(map) => {
            for v in map.values_mut() {
                hydrate_value(v, values);
            }
            None
        }
        _ => None,
    };

    if let Some(r) = replacement {
        *value = r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_strings_and_booleans_are_not_slots() {
        let b = Block::new("hero", None, json!({"a": "", "b": false, "c": null}));
        let t = materialize_template(&b);
        assert_eq!(t.as_block().data, json!({"a": "", "b": false, "c": null}));
        assert!(extract_values(&b).is_empty());
    }

    #[test]
    fn non_object_data_is_left_alone() {
        let b = Block::new("hero", None, json!("just text"));
        assert_eq!(materialize_template(&b).as_block(), &b);
    }
}
