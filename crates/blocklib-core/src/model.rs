use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat map from placeholder key to concrete value, used for hydration.
pub type ValueMap = Map<String, Value>;

/// Family prefix emitted by the site generator (`system-hero`).
pub const SYSTEM_PREFIX: &str = "system-";

/// A single renderable content unit.
///
/// Unknown top-level keys (block ids, editor metadata) are carried verbatim in
/// `extra` so a block survives a template round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    pub data: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Why a raw JSON value could not be treated as a block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedBlock {
    #[error("block is not a JSON object")]
    NotAnObject,
    #[error("block is missing a non-empty `type`")]
    MissingType,
    #[error("block is missing `data`")]
    MissingData,
    #[error("block has an invalid shape: {0}")]
    InvalidShape(String),
}

impl Block {
    pub fn new(kind: impl Into<String>, variant: Option<&str>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            variant: variant.map(str::to_string),
            data,
            extra: Map::new(),
        }
    }

    /// Interpret an arbitrary JSON value as a block.
    ///
    /// A block needs a non-empty string `type` and a non-null `data`.
    pub fn from_value(value: &Value) -> Result<Block, MalformedBlock> {
        let obj = value.as_object().ok_or(MalformedBlock::NotAnObject)?;

        match obj.get("type") {
            Some(Value::String(s)) if !s.is_empty() => {}
            _ => return Err(MalformedBlock::MissingType),
        }
        if matches!(obj.get("data"), None | Some(Value::Null)) {
            return Err(MalformedBlock::MissingData);
        }

        serde_json::from_value(value.clone())
            .map_err(|e| MalformedBlock::InvalidShape(e.to_string()))
    }

    /// Library identity of this block: family prefix stripped, variant
    /// defaulted.
    pub fn identifier(&self) -> ComponentId {
        ComponentId::new(&self.kind, self.variant.as_deref())
    }

    /// Top-level keys of `data`, in insertion order. Empty for non-objects.
    pub fn data_keys(&self) -> impl Iterator<Item = &str> {
        self.data
            .as_object()
            .into_iter()
            .flat_map(|m| m.keys().map(String::as_str))
    }
}

/// The `(type, variant_id)` pair a library entry is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId {
    #[serde(rename = "type")]
    pub kind: String,
    pub variant: String,
}

impl ComponentId {
    pub fn new(kind: &str, variant: Option<&str>) -> Self {
        let stripped = strip_family_prefix(kind);
        Self {
            kind: if stripped.is_empty() {
                "unknown".to_string()
            } else {
                stripped.to_string()
            },
            variant: match variant {
                Some(v) if !v.is_empty() => v.to_string(),
                _ => "default".to_string(),
            },
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.variant)
    }
}

/// Strip the generator's `system-` prefix from a block type.
pub fn strip_family_prefix(kind: &str) -> &str {
    kind.strip_prefix(SYSTEM_PREFIX).unwrap_or(kind)
}

/// A generated page. Blocks stay raw so one malformed block does not reject
/// the whole page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub blocks: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A block whose editable values have been replaced by placeholders.
///
/// Templates are immutable: new content is produced by hydrating into a fresh
/// [`Block`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(Block);

impl Template {
    /// Wrap an already-materialized block.
    pub fn from_block(block: Block) -> Self {
        Self(block)
    }

    pub fn as_block(&self) -> &Block {
        &self.0
    }

    pub fn into_block(self) -> Block {
        self.0
    }
}

/// Editor control kind for one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Richtext,
    Color,
    Image,
    Number,
    Toggle,
    Select,
    Array,
}

impl FieldKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Richtext => "richtext",
            FieldKind::Color => "color",
            FieldKind::Image => "image",
            FieldKind::Number => "number",
            FieldKind::Toggle => "toggle",
            FieldKind::Select => "select",
            FieldKind::Array => "array",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// Descriptor for one editable field, addressed by dotted path from the block
/// root (`data.style.backgroundColor`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableField {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_item_type: Option<FieldKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl EditableField {
    pub fn new(kind: FieldKind, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            path: path.into(),
            placeholder: None,
            options: None,
            min: None,
            max: None,
            array_item_type: None,
            required: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_array_item_type(mut self, kind: FieldKind) -> Self {
        self.array_item_type = Some(kind);
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// Where a library entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntrySource {
    AiGenerated,
    UserCreated,
    /// Hand-built components seeded into the library.
    Foundation,
}

impl EntrySource {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntrySource::AiGenerated => "ai-generated",
            EntrySource::UserCreated => "user-created",
            EntrySource::Foundation => "foundation",
        }
    }
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub usage_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub source: EntrySource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_store_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
    /// Canonical-JSON fingerprint of the entry template.
    #[serde(default)]
    pub fingerprint: String,
}

impl EntryMetadata {
    pub fn new(source: EntrySource, usage_count: u64) -> Self {
        Self {
            usage_count,
            rating: None,
            source,
            original_store_id: None,
            popularity: None,
            description: None,
            recommended: None,
            fingerprint: String::new(),
        }
    }
}

/// A persisted, reusable component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub variant_id: String,
    pub name: String,
    pub category: String,
    pub template: Template,
    pub editable_fields: Vec<EditableField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub metadata: EntryMetadata,
    pub created_at: DateTime<Utc>,
}

impl LibraryEntry {
    pub fn component_id(&self) -> ComponentId {
        ComponentId {
            kind: self.kind.clone(),
            variant: self.variant_id.clone(),
        }
    }
}
