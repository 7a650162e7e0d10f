//! Seeding hand-built foundation components into the library.

use std::collections::BTreeMap;

use blocklib_analyze::defaults::{infer_fields_from_defaults, infer_fields_from_names};
use blocklib_catalog::seed_category;
use blocklib_core::hash::{entry_id, fingerprint};
use blocklib_core::model::{
    Block, EditableField, EntryMetadata, EntrySource, LibraryEntry, Template, ValueMap,
    strip_family_prefix,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::LibraryError;
use crate::store::LibraryStore;

pub const DEFAULT_POPULARITY: u32 = 50;

/// One component type and its variants, as authored by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedManifest {
    #[serde(rename = "type")]
    pub kind: String,
    pub options: Vec<SeedOption>,
    /// Default data per variant id.
    #[serde(default)]
    pub defaults: BTreeMap<String, ValueMap>,
    /// Explicit editable field names per variant id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeedOption {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOptions {
    /// Count what would change without writing.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedError {
    pub variant: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub seeded: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<SeedError>,
}

/// Upsert every option of `manifest` as a foundation entry.
///
/// Entries already seeded with identical content are left alone. Re-seeding
/// never resets usage counts.
pub fn seed_library<S: LibraryStore>(
    store: &S,
    manifest: &SeedManifest,
    options: SeedOptions,
) -> SeedSummary {
    let mut summary = SeedSummary::default();
    let kind = strip_family_prefix(&manifest.kind);

    for option in &manifest.options {
        if option.id.is_empty() {
            summary.skipped += 1;
            continue;
        }

        let fail = |error: String| SeedError {
            variant: option.id.clone(),
            error,
        };

        let entry = match build_seed_entry(kind, manifest, option) {
            Ok(e) => e,
            Err(e) => {
                summary.failed += 1;
                summary.errors.push(fail(e.to_string()));
                continue;
            }
        };

        let existing = match store.find_exact(&entry.kind, &entry.variant_id) {
            Ok(e) => e,
            Err(e) => {
                summary.failed += 1;
                summary.errors.push(fail(e.to_string()));
                continue;
            }
        };
        if existing.as_ref().is_some_and(|prev| same_content(prev, &entry)) {
            summary.unchanged += 1;
            continue;
        }

        if !options.dry_run {
            if let Err(e) = store.upsert(entry) {
                summary.failed += 1;
                summary.errors.push(fail(e.to_string()));
                continue;
            }
        }
        summary.seeded += 1;
    }

    info!(
        kind,
        seeded = summary.seeded,
        unchanged = summary.unchanged,
        failed = summary.failed,
        dry_run = options.dry_run,
        "seed finished"
    );
    summary
}

fn same_content(a: &LibraryEntry, b: &LibraryEntry) -> bool {
    a.metadata.fingerprint == b.metadata.fingerprint
        && a.name == b.name
        && a.category == b.category
        && a.editable_fields == b.editable_fields
}

fn seed_fields(manifest: &SeedManifest, option: &SeedOption) -> Vec<EditableField> {
    let defaults = manifest.defaults.get(&option.id);
    let names = manifest.fields.as_ref().and_then(|f| f.get(&option.id));

    match (names, defaults) {
        (Some(names), _) if !names.is_empty() => infer_fields_from_names(names, defaults),
        (_, Some(defaults)) if !defaults.is_empty() => infer_fields_from_defaults(defaults),
        _ => {
            warn!(kind = %manifest.kind, variant = %option.id, "no field list or defaults, seeding without editable fields");
            Vec::new()
        }
    }
}

fn build_seed_entry(
    kind: &str,
    manifest: &SeedManifest,
    option: &SeedOption,
) -> Result<LibraryEntry, LibraryError> {
    let data = manifest
        .defaults
        .get(&option.id)
        .cloned()
        .unwrap_or_default();
    let template = Template::from_block(Block::new(kind, Some(&option.id), Value::Object(data)));

    let mut metadata = EntryMetadata::new(EntrySource::Foundation, 0);
    metadata.popularity = Some(option.popularity.unwrap_or(DEFAULT_POPULARITY));
    metadata.description = option.description.clone();
    metadata.recommended = option.recommended;
    metadata.fingerprint = fingerprint(&template)?;

    Ok(LibraryEntry {
        id: entry_id(kind, &option.id),
        kind: kind.to_string(),
        variant_id: option.id.clone(),
        name: option.name.clone(),
        category: seed_category(kind).as_str().to_string(),
        editable_fields: seed_fields(manifest, option),
        template,
        thumbnail_url: None,
        metadata,
        created_at: Utc::now(),
    })
}
