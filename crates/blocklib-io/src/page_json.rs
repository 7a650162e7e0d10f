//! Parse block, page and value-map JSON with actionable diagnostics.
//!
//! serde's "missing field" errors are correct but unhelpful for people
//! hand-writing fixtures. Strictness is unchanged; only the messages improve.

use blocklib_core::model::{Block, MalformedBlock, Page, ValueMap};
use serde_json::Value;

const REQUIRED_BLOCK_FIELDS: &[&str] = &["type", "data"];

#[derive(Debug, thiserror::Error)]
pub enum PageJsonError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error(
        "Invalid block JSON: missing required field(s): {}. Required fields: {}.",
        .missing.join(", "),
        REQUIRED_BLOCK_FIELDS.join(", ")
    )]
    MissingBlockFields { missing: Vec<&'static str> },

    #[error("Invalid block JSON: {0}")]
    InvalidBlock(MalformedBlock),

    #[error("Invalid pages array: expected a JSON array of pages, got {0}")]
    NotAnArray(&'static str),

    #[error("Invalid page at index {index}: {reason}")]
    InvalidPage { index: usize, reason: String },

    #[error("Invalid values JSON: expected an object mapping placeholder keys to values, got {0}")]
    NotAnObject(&'static str),
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a single block.
pub fn parse_block_json_str(s: &str) -> Result<Block, PageJsonError> {
    let v: Value = serde_json::from_str(s)?;
    parse_block_value(&v)
}

pub fn parse_block_value(v: &Value) -> Result<Block, PageJsonError> {
    if let Some(obj) = v.as_object() {
        let missing: Vec<&'static str> = REQUIRED_BLOCK_FIELDS
            .iter()
            .copied()
            .filter(|k| !obj.contains_key(*k))
            .collect();
        if !missing.is_empty() {
            return Err(PageJsonError::MissingBlockFields { missing });
        }
    }
    Block::from_value(v).map_err(PageJsonError::InvalidBlock)
}

/// Parse a pages document: a JSON array of objects, each optionally holding a
/// `blocks` array. Individual blocks are left raw.
pub fn parse_pages_json_str(s: &str) -> Result<Vec<Page>, PageJsonError> {
    let v: Value = serde_json::from_str(s)?;
    let items = v.as_array().ok_or(PageJsonError::NotAnArray(type_name(&v)))?;

    items
        .iter()
        .enumerate()
        .map(|(index, page)| {
            if !page.is_object() {
                return Err(PageJsonError::InvalidPage {
                    index,
                    reason: format!("expected an object, got {}", type_name(page)),
                });
            }
            serde_json::from_value(page.clone()).map_err(|e| PageJsonError::InvalidPage {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Parse a flat placeholder-key to value map used for hydration.
pub fn parse_values_json_str(s: &str) -> Result<ValueMap, PageJsonError> {
    match serde_json::from_str::<Value>(s)? {
        Value::Object(map) => Ok(map),
        other => Err(PageJsonError::NotAnObject(type_name(&other))),
    }
}
