//! Component categories and display names.

use core::fmt;

use blocklib_core::label::format_label;
use blocklib_core::model::strip_family_prefix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Layout,
    Content,
    Commerce,
    Forms,
    Navigation,
    Media,
    Other,
}

impl Category {
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Layout => "layout",
            Category::Content => "content",
            Category::Commerce => "commerce",
            Category::Forms => "forms",
            Category::Navigation => "navigation",
            Category::Media => "media",
            Category::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Category> {
        ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).as_str())
    }
}

pub const ALL: [Category; 7] = [
    Category::Layout,
    Category::Content,
    Category::Commerce,
    Category::Forms,
    Category::Navigation,
    Category::Media,
    Category::Other,
];

/// Category for a component extracted from generated pages.
pub fn categorize(kind: &str) -> Category {
    match strip_family_prefix(kind) {
        "hero" | "header" | "footer" => Category::Layout,
        "rich-text" | "features" | "testimonials" | "gallery" => Category::Content,
        "product-grid" | "product-card" => Category::Commerce,
        "cta" | "contact" => Category::Forms,
        _ => Category::Other,
    }
}

/// Category for a seeded foundation component.
///
/// The foundation library predates extraction and files headers and footers
/// under navigation and visual libraries under media.
pub fn seed_category(kind: &str) -> Category {
    match strip_family_prefix(kind) {
        "hero" | "layout" => Category::Layout,
        "header" | "footer" => Category::Navigation,
        "product-card" | "product-page" | "collection" => Category::Commerce,
        "blog" | "category" | "category-page" | "section" => Category::Content,
        "contact" => Category::Forms,
        "gallery" | "social" | "video" | "scroll" => Category::Media,
        _ => Category::Other,
    }
}

/// Display name: `"<Variant> <Type>"`, e.g. `"Minimal Hero"`.
pub fn component_name(kind: &str, variant: &str) -> String {
    let kind = strip_family_prefix(kind);
    format!("{} {}", format_label(variant), format_label(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_table() {
        assert_eq!(categorize("hero"), Category::Layout);
        assert_eq!(categorize("system-footer"), Category::Layout);
        assert_eq!(categorize("testimonials"), Category::Content);
        assert_eq!(categorize("product-card"), Category::Commerce);
        assert_eq!(categorize("cta"), Category::Forms);
        assert_eq!(categorize("video"), Category::Other);
    }

    #[test]
    fn seed_table_differs_for_navigation_and_media() {
        assert_eq!(seed_category("header"), Category::Navigation);
        assert_eq!(seed_category("gallery"), Category::Media);
        assert_eq!(seed_category("unknown-thing"), Category::Other);
    }

    #[test]
    fn names_use_label_formatting() {
        assert_eq!(component_name("system-hero", "aurora"), "Aurora Hero");
        assert_eq!(component_name("product-grid", "modernDark"), "Modern Dark Product-grid");
    }

    #[test]
    fn parse_round_trips_every_category() {
        for c in ALL {
            assert_eq!(Category::parse(c.as_str()), Some(c));
        }
        assert_eq!(Category::parse("bogus"), None);
    }
}
