//! Field inference for hand-built components from their default data.
//!
//! Foundation components ship a defaults object (and sometimes an explicit
//! field-name list) instead of a generated block. Inference here leans on key
//! names first, since defaults are often empty placeholders, and produces the
//! richer descriptors an authored component deserves: selects with option
//! sets and bounded numbers.

use blocklib_core::label::humanize_field_name;
use blocklib_core::model::{EditableField, FieldKind};
use serde_json::{Map, Value};

use crate::walk::{ROOT_PREFIX, join_path};

/// Nested objects deeper than this many path segments are not recursed into.
const MAX_PATH_SEGMENTS: usize = 3;

const IMAGE_WORDS: &[&str] = &[
    "image",
    "img",
    "photo",
    "picture",
    "icon",
    "logo",
    "thumbnail",
    "banner",
];
const TOGGLE_PREFIXES: &[&str] = &["show", "is", "has", "enable"];
const NUMBER_WORDS: &[&str] = &[
    "count", "size", "width", "height", "spacing", "duration", "delay", "opacity",
];
const TEXTAREA_WORDS: &[&str] = &["description", "content", "bio", "about", "message"];
const SELECT_WORDS: &[&str] = &["style", "variant", "type", "position", "alignment", "align"];

/// Infer a field kind from a field name and, when known, its default value.
pub fn infer_field_kind(name: &str, value: Option<&Value>) -> FieldKind {
    let lower = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if value.is_some_and(Value::is_array) {
        return FieldKind::Array;
    }
    if has(&["color", "colour"]) {
        return FieldKind::Color;
    }
    if has(IMAGE_WORDS) {
        return FieldKind::Image;
    }
    if TOGGLE_PREFIXES.iter().any(|p| lower.starts_with(p))
        || lower.contains("visible")
        || value.is_some_and(Value::is_boolean)
    {
        return FieldKind::Toggle;
    }
    if has(NUMBER_WORDS) || value.is_some_and(Value::is_number) {
        return FieldKind::Number;
    }
    if has(&["heading", "title"]) || lower == "headline" {
        return FieldKind::Richtext;
    }
    if has(TEXTAREA_WORDS) || (lower.contains("text") && lower.contains("long")) {
        return FieldKind::Textarea;
    }
    if has(SELECT_WORDS) {
        return FieldKind::Select;
    }
    FieldKind::Text
}

/// Fields of a defaults object, with paths under `data`.
pub fn infer_fields_from_defaults(defaults: &Map<String, Value>) -> Vec<EditableField> {
    let mut out = Vec::new();
    process_object(defaults, ROOT_PREFIX, &mut out);
    out
}

/// Fields for an explicit list of top-level field names.
pub fn infer_fields_from_names(
    names: &[String],
    defaults: Option<&Map<String, Value>>,
) -> Vec<EditableField> {
    names
        .iter()
        .map(|name| {
            let default = defaults.and_then(|d| d.get(name));
            let mut field = EditableField::new(
                infer_field_kind(name, default),
                humanize_field_name(name),
                join_path(ROOT_PREFIX, name),
            )
            .with_required(false);
            if let Some(Value::String(s)) = default {
                field = field.with_placeholder(s.clone());
            }
            field
        })
        .collect()
}

fn process_object(obj: &Map<String, Value>, path: &str, out: &mut Vec<EditableField>) {
    // Rendered element trees leak into defaults now and then; they are not data.
    if obj.contains_key("$$typeof") {
        return;
    }

    for (key, value) in obj {
        if key.starts_with('_') || matches!(key.as_str(), "id" | "type" | "variant") {
            continue;
        }
        let field_path = join_path(path, key);

        if key == "style" || key.ends_with("_style") || key.ends_with("Style") {
            if let Value::Object(nested) = value {
                process_object(nested, &field_path, out);
            }
            continue;
        }

        if value.is_array() {
            out.push(
                EditableField::new(FieldKind::Array, humanize_field_name(key), field_path)
                    .with_required(false),
            );
            continue;
        }

        if let Value::Object(nested) = value {
            if path.split('.').count() < MAX_PATH_SEGMENTS {
                process_object(nested, &field_path, out);
                continue;
            }
        }

        out.push(describe(key, value, field_path));
    }
}

fn describe(key: &str, value: &Value, path: String) -> EditableField {
    let kind = infer_field_kind(key, Some(value));
    let mut field = EditableField::new(kind, humanize_field_name(key), path).with_required(false);

    match kind {
        FieldKind::Number => {
            if let Some(n) = value.as_f64() {
                field = field.with_min(0.0).with_max(n * 10.0);
            }
        }
        FieldKind::Select => {
            let lower = key.to_lowercase();
            if lower.contains("align") {
                field = field.with_options(["left", "center", "right"]);
            } else if lower.contains("position") {
                field = field.with_options(["top", "center", "bottom", "left", "right"]);
            } else if lower.contains("size") {
                field = field.with_options(["small", "medium", "large"]);
            }
        }
        FieldKind::Text | FieldKind::Textarea => {
            field = field.with_placeholder(value.as_str().unwrap_or_default());
        }
        _ => {}
    }

    field
}
