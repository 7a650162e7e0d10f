mod util;

use blocklib_analyze::{analyze_block_structure, compute_editable_fields};
use blocklib_core::model::FieldKind;
use serde_json::json;

#[test]
fn hero_sample_fields_in_key_order() {
    let hero = util::hero_block();
    let fields = compute_editable_fields(&hero.data);

    let got: Vec<(&str, FieldKind, &str)> = fields
        .iter()
        .map(|f| (f.path.as_str(), f.kind, f.label.as_str()))
        .collect();

    assert_eq!(
        got,
        vec![
            ("data.heading", FieldKind::Richtext, "Heading"),
            ("data.subheading", FieldKind::Richtext, "Subheading"),
            ("data.ctaText", FieldKind::Text, "Cta Text"),
            ("data.ctaLink", FieldKind::Text, "Cta Link"),
            ("data.imageUrl", FieldKind::Image, "Image Url"),
            ("data.style.backgroundColor", FieldKind::Color, "Background Color"),
            ("data.style.textColor", FieldKind::Color, "Text Color"),
            ("data.style.buttonColor", FieldKind::Color, "Button Color"),
        ]
    );
}

#[test]
fn arrays_are_atomic() {
    let fields = compute_editable_fields(&json!({"items": [{"a": 1}, {"a": 2}]}));
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].path, "data.items");
    assert_eq!(fields[0].kind, FieldKind::Array);

    let features = util::features_block();
    let fields = compute_editable_fields(&features.data);
    let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["data.heading", "data.features"]);
}

#[test]
fn nested_objects_recurse_and_unsupported_values_drop() {
    let data = json!({
        "layout": {
            "spacing": { "gap": 12 },
            "sticky": false,
            "note": null
        },
        "empty": [],
        "numbers": [1, 2, 3]
    });
    let fields = compute_editable_fields(&data);
    let paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["data.layout.spacing.gap", "data.layout.sticky"]);
}

#[test]
fn custom_prefix_and_non_object_input() {
    let fields = analyze_block_structure(&json!({"title": "T"}), "block.data");
    assert_eq!(fields[0].path, "block.data.title");

    assert!(compute_editable_fields(&json!("scalar")).is_empty());
    assert!(compute_editable_fields(&json!([{"a": 1}])).is_empty());
    assert!(compute_editable_fields(&json!(null)).is_empty());
}

#[test]
fn paths_are_unique() {
    let hero = util::hero_block();
    let fields = compute_editable_fields(&hero.data);
    let mut paths: Vec<&str> = fields.iter().map(|f| f.path.as_str()).collect();
    let before = paths.len();
    paths.sort_unstable();
    paths.dedup();
    assert_eq!(paths.len(), before);
}
