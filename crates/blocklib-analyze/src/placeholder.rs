//! The `{{path}}` placeholder micro-format.
//!
//! Grammar: `{{` key `}}`, where key is a path relative to the block's `data`
//! optionally followed by a type suffix (`_url`, `_color`, `_number`). The
//! key, suffix included, is what hydration value maps are keyed by.

use std::fmt;

use serde_json::Value;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Type recorded in a placeholder's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderHint {
    Plain,
    Url,
    Color,
    Number,
}

impl PlaceholderHint {
    pub const fn suffix(self) -> &'static str {
        match self {
            PlaceholderHint::Plain => "",
            PlaceholderHint::Url => "_url",
            PlaceholderHint::Color => "_color",
            PlaceholderHint::Number => "_number",
        }
    }

    /// Hint for a value that gets a template slot, from the value's own shape.
    ///
    /// Empty strings, booleans, null, arrays and objects get no slot.
    pub fn for_value(value: &Value) -> Option<PlaceholderHint> {
        match value {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) if s.starts_with("http") => Some(PlaceholderHint::Url),
            Value::String(s) if s.starts_with('#') => Some(PlaceholderHint::Color),
            Value::String(_) => Some(PlaceholderHint::Plain),
            Value::Number(_) => Some(PlaceholderHint::Number),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder {
    pub path: String,
    pub hint: PlaceholderHint,
}

impl Placeholder {
    pub fn new(path: impl Into<String>, hint: PlaceholderHint) -> Self {
        Self {
            path: path.into(),
            hint,
        }
    }

    /// Hydration map key: path plus type suffix.
    pub fn key(&self) -> String {
        format!("{}{}", self.path, self.hint.suffix())
    }

    /// Inner key of a placeholder-shaped string, without parsing the suffix.
    pub fn inner(s: &str) -> Option<&str> {
        if s.len() < OPEN.len() + CLOSE.len() {
            return None;
        }
        s.strip_prefix(OPEN)?.strip_suffix(CLOSE)
    }

    pub fn parse(s: &str) -> Option<Placeholder> {
        let inner = Self::inner(s)?;
        for hint in [
            PlaceholderHint::Number,
            PlaceholderHint::Color,
            PlaceholderHint::Url,
        ] {
            if let Some(path) = inner.strip_suffix(hint.suffix()) {
                return Some(Placeholder::new(path, hint));
            }
        }
        Some(Placeholder::new(inner, PlaceholderHint::Plain))
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{OPEN}{}{}{CLOSE}", self.path, self.hint.suffix())
    }
}
