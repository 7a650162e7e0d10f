use anyhow::Result;
use blocklib_io::prelude::*;
use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::{Value, json};

static BLOCK_SCHEMA: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let schema_json: Value =
        serde_json::from_str(include_str!("../../../schemas/block.schema.json"))
            .map_err(|e| format!("invalid block schema JSON: {e}"))?;

    Validator::new(&schema_json).map_err(|e| format!("compile block schema: {e}"))
});

static PAGES_SCHEMA: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let schema_json: Value =
        serde_json::from_str(include_str!("../../../schemas/pages.schema.json"))
            .map_err(|e| format!("invalid pages schema JSON: {e}"))?;

    Validator::new(&schema_json).map_err(|e| format!("compile pages schema: {e}"))
});

fn block_schema() -> &'static Validator {
    BLOCK_SCHEMA.as_ref().unwrap()
}

fn pages_schema() -> &'static Validator {
    PAGES_SCHEMA.as_ref().unwrap()
}

fn assert_valid(schema: &Validator, instance: &Value) {
    let mut errors = schema.iter_errors(instance).peekable();
    if errors.peek().is_some() {
        let msgs: Vec<String> = errors.map(|e| e.to_string()).collect();
        panic!("schema validation failed:\n{}", msgs.join("\n"));
    }
}

#[test]
fn demos_conform_to_json_schemas() -> Result<()> {
    let hero: Value = serde_json::from_str(include_str!("../../../demos/hero-block.json"))?;
    let features: Value =
        serde_json::from_str(include_str!("../../../demos/features-block.json"))?;
    let pages: Value = serde_json::from_str(include_str!("../../../demos/pages.json"))?;

    assert_valid(block_schema(), &hero);
    assert_valid(block_schema(), &features);
    assert_valid(pages_schema(), &pages);

    Ok(())
}

#[test]
fn templates_and_hydrated_blocks_stay_valid_blocks() -> Result<()> {
    let hero: Block = serde_json::from_str(include_str!("../../../demos/hero-block.json"))?;

    let template = materialize_template(&hero);
    assert_valid(block_schema(), &serde_json::to_value(&template)?);

    let hydrated = hydrate_template(&template, &extract_values(&hero));
    assert_valid(block_schema(), &serde_json::to_value(&hydrated)?);

    Ok(())
}

#[test]
fn block_schema_rejects_what_the_parser_rejects() {
    for bad in [
        json!({"variant": "x", "data": {}}),
        json!({"type": "", "data": {}}),
        json!({"type": "hero", "data": null}),
        json!({"type": "hero"}),
    ] {
        assert!(!block_schema().is_valid(&bad), "schema accepted {bad}");
        assert!(Block::from_value(&bad).is_err(), "parser accepted {bad}");
    }
}

#[test]
fn schema_ids_carry_the_bundle_version() -> Result<()> {
    let suffix = format!(".v{}.schema.json", blocklib_io::version::SCHEMA_BUNDLE_V);
    for text in [
        include_str!("../../../schemas/block.schema.json"),
        include_str!("../../../schemas/pages.schema.json"),
    ] {
        let schema: Value = serde_json::from_str(text)?;
        let id = schema["$id"].as_str().unwrap_or_default();
        assert!(id.ends_with(&suffix), "schema $id {id:?} does not end with {suffix}");
    }
    Ok(())
}

#[test]
fn pages_schema_requires_an_array() {
    assert!(!pages_schema().is_valid(&json!({"blocks": []})));
    assert!(pages_schema().is_valid(&json!([{"slug": "/"}])));
    // Malformed blocks are the extractor's business, not the schema's.
    assert!(pages_schema().is_valid(&json!([{"blocks": [null, 3, {"type": "hero"}]}])));
}
