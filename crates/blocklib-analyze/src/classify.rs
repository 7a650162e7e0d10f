//! Field classification as an ordered rule chain.
//!
//! Each rule inspects one `(key, value, path)` candidate and either claims it
//! with a descriptor or passes. The first rule that claims a candidate wins.
//! Rules never fail: a candidate no rule claims is simply not editable.

use blocklib_core::label::format_label;
use blocklib_core::model::{EditableField, FieldKind};
use once_cell::sync::Lazy;
use serde_json::Value;

/// Strings shorter than this many UTF-16 code units get a single-line editor.
/// An emoji outside the BMP counts as two.
pub const SHORT_TEXT_MAX_CHARS: usize = 100;

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

/// One key/value pair under consideration.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub key: &'a str,
    pub value: &'a Value,
    pub path: &'a str,
    key_lower: &'a str,
}

impl<'a> Candidate<'a> {
    /// Lowercased key, for case-insensitive name matching.
    pub fn key_lower(&self) -> &'a str {
        self.key_lower
    }

    pub fn key_contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.key_lower.contains(n))
    }

    fn field(&self, kind: FieldKind) -> EditableField {
        EditableField::new(kind, format_label(self.key), self.path)
    }

    fn enter_prompt(&self) -> String {
        format!("Enter {}...", format_label(self.key).to_lowercase())
    }
}

pub trait FieldRule: Send + Sync {
    /// Short stable name, used in diagnostics.
    fn name(&self) -> &'static str;

    fn classify(&self, candidate: &Candidate<'_>) -> Option<EditableField>;
}

/// Key mentions a color.
pub struct ColorRule;

impl FieldRule for ColorRule {
    fn name(&self) -> &'static str {
        "color"
    }

    fn classify(&self, c: &Candidate<'_>) -> Option<EditableField> {
        c.key_contains_any(&["color", "colour"])
            .then(|| c.field(FieldKind::Color).with_placeholder("#000000"))
    }
}

/// Key names an image or URL slot.
pub struct ImageRule;

impl FieldRule for ImageRule {
    fn name(&self) -> &'static str {
        "image"
    }

    fn classify(&self, c: &Candidate<'_>) -> Option<EditableField> {
        (c.key_contains_any(&["image", "url"]) || c.key_lower() == "src")
            .then(|| c.field(FieldKind::Image).with_placeholder("https://..."))
    }
}

pub struct NumberRule;

impl FieldRule for NumberRule {
    fn name(&self) -> &'static str {
        "number"
    }

    fn classify(&self, c: &Candidate<'_>) -> Option<EditableField> {
        c.value
            .is_number()
            .then(|| c.field(FieldKind::Number).with_min(0.0))
    }
}

pub struct ToggleRule;

impl FieldRule for ToggleRule {
    fn name(&self) -> &'static str {
        "toggle"
    }

    fn classify(&self, c: &Candidate<'_>) -> Option<EditableField> {
        c.value.is_boolean().then(|| c.field(FieldKind::Toggle))
    }
}

/// Strings: long-form keys, headings, then length.
pub struct TextRule;

impl FieldRule for TextRule {
    fn name(&self) -> &'static str {
        "text"
    }

    fn classify(&self, c: &Candidate<'_>) -> Option<EditableField> {
        let s = c.value.as_str()?;

        let kind = if c.key_contains_any(&["description", "content", "body"]) {
            FieldKind::Textarea
        } else if c.key_contains_any(&["heading", "title"]) {
            FieldKind::Richtext
        } else if s.encode_utf16().count() < SHORT_TEXT_MAX_CHARS {
            FieldKind::Text
        } else {
            FieldKind::Textarea
        };

        Some(c.field(kind).with_placeholder(c.enter_prompt()))
    }
}

/// Non-empty arrays of objects or strings become one list-editor field.
///
/// Elements are not introspected; the item editor kind is always text.
pub struct ArrayRule;

impl FieldRule for ArrayRule {
    fn name(&self) -> &'static str {
        "array"
    }

    fn classify(&self, c: &Candidate<'_>) -> Option<EditableField> {
        let first = c.value.as_array()?.first()?;
        match first {
            Value::Object(_) | Value::Array(_) | Value::String(_) => Some(
                c.field(FieldKind::Array)
                    .with_array_item_type(FieldKind::Text),
            ),
            _ => None,
        }
    }
}

/// An ordered rule chain.
pub struct Classifier {
    rules: Vec<Box<dyn FieldRule>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::with_rules(vec![
            Box::new(ColorRule),
            Box::new(ImageRule),
            Box::new(NumberRule),
            Box::new(ToggleRule),
            Box::new(TextRule),
            Box::new(ArrayRule),
        ])
    }
}

impl Classifier {
    pub fn with_rules(rules: Vec<Box<dyn FieldRule>>) -> Self {
        Self { rules }
    }

    /// Append a rule with the lowest priority.
    pub fn push_rule(&mut self, rule: Box<dyn FieldRule>) {
        self.rules.push(rule);
    }

    /// Insert a rule at `index` (0 = highest priority). Clamped to the chain length.
    pub fn insert_rule(&mut self, index: usize, rule: Box<dyn FieldRule>) {
        let index = index.min(self.rules.len());
        self.rules.insert(index, rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn classify(&self, key: &str, value: &Value, path: &str) -> Option<EditableField> {
        let key_lower = key.to_lowercase();
        let candidate = Candidate {
            key,
            value,
            path,
            key_lower: &key_lower,
        };
        self.rules.iter().find_map(|r| r.classify(&candidate))
    }
}

/// Classify with the default rule chain.
pub fn classify(key: &str, value: &Value, path: &str) -> Option<EditableField> {
    DEFAULT_CLASSIFIER.classify(key, value, path)
}

pub(crate) fn with_default<T>(f: impl FnOnce(&Classifier) -> T) -> T {
    f(&DEFAULT_CLASSIFIER)
}
