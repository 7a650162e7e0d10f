//! Listing, filtering and search over library entries.

use std::cmp::Ordering;

use blocklib_core::model::LibraryEntry;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const DEFAULT_SHORTLIST_LIMIT: usize = 10;
/// Upper bound on search results.
pub const SEARCH_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    UsageCount,
    CreatedAt,
    Rating,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryQuery {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub limit: usize,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for LibraryQuery {
    fn default() -> Self {
        Self {
            kind: None,
            category: None,
            limit: DEFAULT_LIST_LIMIT,
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl LibraryQuery {
    /// Most-used entries first.
    pub fn popular(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Newest entries first.
    pub fn recent(limit: usize) -> Self {
        Self {
            limit,
            sort_by: SortBy::CreatedAt,
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    fn matches(&self, entry: &LibraryEntry) -> bool {
        self.kind.as_deref().is_none_or(|k| entry.kind == k)
            && self.category.as_deref().is_none_or(|c| entry.category == c)
    }
}

fn compare(a: &LibraryEntry, b: &LibraryEntry, by: SortBy) -> Ordering {
    match by {
        SortBy::UsageCount => a.metadata.usage_count.cmp(&b.metadata.usage_count),
        SortBy::CreatedAt => a.created_at.cmp(&b.created_at),
        // Unrated sorts lowest.
        SortBy::Rating => match (a.metadata.rating, b.metadata.rating) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => Ordering::Equal,
        },
    }
}

/// Filter, sort and truncate. Ties keep insertion order in ascending sorts and
/// put later insertions first in descending ones.
pub fn select(entries: Vec<LibraryEntry>, q: &LibraryQuery) -> Vec<LibraryEntry> {
    let mut hits: Vec<(usize, LibraryEntry)> = entries
        .into_iter()
        .enumerate()
        .filter(|(_, e)| q.matches(e))
        .collect();

    hits.sort_by(|(ia, a), (ib, b)| {
        let ord = compare(a, b, q.sort_by).then(ia.cmp(ib));
        match q.sort_order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });

    hits.into_iter().take(q.limit).map(|(_, e)| e).collect()
}

fn normalize(s: &str) -> String {
    s.nfc().collect::<String>().to_lowercase()
}

/// Case-insensitive substring match on entry names, most used first.
pub fn search(entries: Vec<LibraryEntry>, term: &str, limit: usize) -> Vec<LibraryEntry> {
    let needle = normalize(term.trim());
    let matched = entries
        .into_iter()
        .filter(|e| normalize(&e.name).contains(&needle))
        .collect();
    select(
        matched,
        &LibraryQuery {
            limit,
            ..LibraryQuery::default()
        },
    )
}
