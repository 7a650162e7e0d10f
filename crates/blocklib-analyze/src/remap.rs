//! Carry section content across layout switches.
//!
//! Content uses the universal section shape: singular `heading`,
//! `subheading`, `text`, `image`, `buttonLink`, ... plus an optional `items`
//! list for grid/list style layouts. Remapping is best effort: switching to a
//! singular layout and back can drop list items beyond the first.

use serde_json::{Map, Value, json};

/// Substrings that mark a layout id as list oriented.
pub const LIST_LAYOUT_MARKERS: [&str; 7] = [
    "grid",
    "list",
    "slider",
    "features",
    "collection",
    "cards",
    "columns",
];

/// Number of items synthesized when moving singular content into a list layout.
pub const SEEDED_ITEM_COUNT: usize = 3;

pub fn is_list_layout(target_layout_id: &str) -> bool {
    LIST_LAYOUT_MARKERS
        .iter()
        .any(|m| target_layout_id.contains(m))
}

/// Adapt `content` for `target_layout_id`. The input is not modified.
///
/// - list target without items: seed items from the singular fields
/// - singular target with items: promote the first item's image when the
///   singular image is empty; `heading` is never overwritten
pub fn remap_for_layout(content: &Map<String, Value>, target_layout_id: &str) -> Map<String, Value> {
    let mut out = content.clone();
    let items_len = content.get("items").and_then(Value::as_array).map(Vec::len);

    if is_list_layout(target_layout_id) {
        if items_len.unwrap_or(0) == 0 {
            out.insert("items".to_string(), Value::Array(seed_items(content)));
        }
    } else if items_len.unwrap_or(0) > 0 {
        promote_first_image(&mut out);
    }

    out
}

fn seed_items(content: &Map<String, Value>) -> Vec<Value> {
    let title = first_truthy(content, &["heading"]).unwrap_or_else(|| json!("Feature 1"));
    let description =
        first_truthy(content, &["subheading", "text"]).unwrap_or_else(|| json!("Description"));

    let mut first = Map::new();
    first.insert("id".to_string(), json!("1"));
    first.insert("title".to_string(), title);
    first.insert("description".to_string(), description);
    if let Some(image) = present(content, "image") {
        first.insert("image".to_string(), image);
    }
    if let Some(link) = present(content, "buttonLink") {
        first.insert("link".to_string(), link);
    }

    let mut items = vec![Value::Object(first)];
    for n in 2..=SEEDED_ITEM_COUNT {
        items.push(json!({
            "id": n.to_string(),
            "title": format!("Feature {n}"),
            "description": "Description",
            "image": "",
        }));
    }
    items
}

fn promote_first_image(out: &mut Map<String, Value>) {
    if out.get("image").is_some_and(is_truthy) {
        return;
    }
    let first_image = out
        .get("items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|item| item.get("image"))
        .filter(|v| is_truthy(v))
        .cloned();

    if let Some(image) = first_image {
        out.insert("image".to_string(), image);
    }
}

fn present(content: &Map<String, Value>, key: &str) -> Option<Value> {
    content.get(key).filter(|v| !v.is_null()).cloned()
}

fn first_truthy(content: &Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .filter_map(|k| content.get(*k))
        .find(|v| is_truthy(v))
        .cloned()
}

/// Empty strings, zero, `false` and `null` count as absent content.
fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_markers() {
        assert!(is_list_layout("feature-grid"));
        assert!(is_list_layout("logo-slider"));
        assert!(is_list_layout("three-columns"));
        assert!(!is_list_layout("centered"));
        assert!(!is_list_layout("split-left"));
    }
}
