use blocklib_analyze::remap_for_layout;
use serde_json::{Map, Value, json};

fn content(v: Value) -> Map<String, Value> {
    v.as_object().cloned().unwrap()
}

#[test]
fn list_target_seeds_three_items_from_singular_fields() {
    let input = content(json!({"heading": "H", "image": "i.png"}));
    let out = remap_for_layout(&input, "feature-grid");

    let items = out["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["title"], json!("H"));
    assert_eq!(items[0]["image"], json!("i.png"));
    assert_eq!(items[0]["description"], json!("Description"));
    assert_eq!(items[0]["id"], json!("1"));
    assert!(items[0].get("link").is_none());

    assert_eq!(
        items[1],
        json!({"id": "2", "title": "Feature 2", "description": "Description", "image": ""})
    );
    assert_eq!(items[2]["title"], json!("Feature 3"));

    // Singular content is left in place.
    assert_eq!(out["heading"], json!("H"));
    // Input untouched.
    assert!(input.get("items").is_none());
}

#[test]
fn seeding_falls_back_through_subheading_text_and_defaults() {
    let out = remap_for_layout(
        &content(json!({"heading": "", "text": "Body", "buttonLink": "/shop"})),
        "product-collection",
    );
    let first = &out["items"][0];
    assert_eq!(first["title"], json!("Feature 1"));
    assert_eq!(first["description"], json!("Body"));
    assert_eq!(first["link"], json!("/shop"));
    assert!(first.get("image").is_none());

    let out = remap_for_layout(
        &content(json!({"subheading": "Sub", "text": "Body"})),
        "cards",
    );
    assert_eq!(out["items"][0]["description"], json!("Sub"));
}

#[test]
fn existing_items_are_not_replaced() {
    let input = content(json!({"items": [{"id": "a", "title": "Mine"}]}));
    let out = remap_for_layout(&input, "logo-list");
    assert_eq!(out, input);

    let out = remap_for_layout(&content(json!({"items": []})), "logo-list");
    assert_eq!(out["items"].as_array().unwrap().len(), 3);
}

#[test]
fn leaving_a_list_promotes_image_but_not_heading() {
    let input = content(json!({"heading": "", "items": [{"image": "i.png", "title": "T"}]}));
    let out = remap_for_layout(&input, "centered");

    assert_eq!(out["image"], json!("i.png"));
    assert_eq!(out["heading"], json!(""));
    assert_eq!(out["items"], input["items"]);
}

#[test]
fn existing_singular_image_wins() {
    let out = remap_for_layout(
        &content(json!({"image": "mine.png", "items": [{"image": "i.png"}]})),
        "split-left",
    );
    assert_eq!(out["image"], json!("mine.png"));

    let out = remap_for_layout(
        &content(json!({"items": [{"title": "no image"}]})),
        "split-left",
    );
    assert!(out.get("image").is_none());
}
