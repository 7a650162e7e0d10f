use blocklib_core::model::{Block, EntrySource, LibraryEntry};
use blocklib_library::query::{LibraryQuery, SortBy, SortOrder};
use blocklib_library::{LibraryStore, MemoryStore, build_entry};
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

fn entry(kind: &str, variant: &str, usage: u64, rating: Option<f64>, day: i64) -> LibraryEntry {
    let block = Block::new(kind, Some(variant), json!({"heading": variant}));
    let mut e = build_entry(&block, EntrySource::AiGenerated, None).unwrap();
    e.metadata.usage_count = usage;
    e.metadata.rating = rating;
    e.created_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::days(day);
    e
}

fn store() -> MemoryStore {
    MemoryStore::with_entries(vec![
        entry("hero", "aurora", 5, Some(4.5), 0),
        entry("hero", "borealis", 12, None, 3),
        entry("features", "grid", 7, Some(3.0), 1),
        entry("product-grid", "modern", 1, Some(5.0), 2),
        entry("cta", "café", 0, None, 4),
    ])
}

fn variants(entries: &[LibraryEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.variant_id.as_str()).collect()
}

#[test]
fn default_query_is_most_used_first() {
    let got = store().list(&LibraryQuery::default()).unwrap();
    assert_eq!(variants(&got), ["borealis", "grid", "aurora", "modern", "café"]);
}

#[test]
fn popular_and_recent_truncate() {
    let s = store();
    assert_eq!(
        variants(&s.list(&LibraryQuery::popular(2)).unwrap()),
        ["borealis", "grid"]
    );
    assert_eq!(
        variants(&s.list(&LibraryQuery::recent(3)).unwrap()),
        ["café", "borealis", "modern"]
    );
}

#[test]
fn filters_by_type_and_category() {
    let s = store();
    let heroes = s.list(&LibraryQuery::default().with_kind("hero")).unwrap();
    assert_eq!(variants(&heroes), ["borealis", "aurora"]);

    let commerce = s
        .list(&LibraryQuery::default().with_category("commerce"))
        .unwrap();
    assert_eq!(variants(&commerce), ["modern"]);

    assert_eq!(s.find_by_type("hero").unwrap().len(), 2);
}

#[test]
fn rating_sort_puts_unrated_last_when_descending() {
    let q = LibraryQuery {
        sort_by: SortBy::Rating,
        ..LibraryQuery::default()
    };
    let got = store().list(&q).unwrap();
    assert_eq!(variants(&got)[..3], ["modern", "aurora", "grid"]);

    let asc = LibraryQuery {
        sort_by: SortBy::Rating,
        sort_order: SortOrder::Asc,
        ..LibraryQuery::default()
    };
    let got = store().list(&asc).unwrap();
    assert_eq!(variants(&got)[2..], ["grid", "aurora", "modern"]);
}

#[test]
fn search_is_case_and_normalization_insensitive() {
    let s = store();
    let got = s.search("HERO").unwrap();
    assert_eq!(variants(&got), ["borealis", "aurora"]);

    // Decomposed "e" + combining acute finds the precomposed name.
    let got = s.search("cafe\u{301}").unwrap();
    assert_eq!(variants(&got), ["café"]);

    assert!(s.search("nothing-matches").unwrap().is_empty());
}

#[test]
fn search_caps_results() {
    let entries = (0..30)
        .map(|i| entry("hero", &format!("v{i}"), i, None, i as i64))
        .collect();
    let s = MemoryStore::with_entries(entries);
    let got = s.search("hero").unwrap();
    assert_eq!(got.len(), 20);
    assert_eq!(got[0].variant_id, "v29");
}
