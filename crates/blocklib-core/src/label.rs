//! Human-readable labels derived from JSON keys.

/// Format a camelCase or snake_case key into a label.
///
/// Rules, applied in order:
/// - a space is inserted before every ASCII uppercase letter
/// - `_` becomes a space
/// - the first character is uppercased
/// - leading/trailing whitespace is trimmed
///
/// Only the first word is capitalized for snake_case keys:
/// `button_text` becomes `Button text`.
pub fn format_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
            spaced.push(c);
        } else if c == '_' {
            spaced.push(' ');
        } else {
            spaced.push(c);
        }
    }
    capitalize_first(&spaced).trim().to_string()
}

/// Humanize a field name for defaults-based inference.
///
/// snake_case names capitalize every word (`button_text` -> `Button Text`);
/// everything else follows camelCase splitting with whitespace runs collapsed.
pub fn humanize_field_name(name: &str) -> String {
    if name.contains('_') {
        return name
            .split('_')
            .map(capitalize_first)
            .collect::<Vec<_>>()
            .join(" ");
    }

    let mut spaced = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    capitalize_first(&spaced)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
