//! Dedup-then-insert admission of generated blocks into the library.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use blocklib_analyze::{compute_editable_fields, materialize_template, similarity};
use blocklib_catalog::{categorize, component_name};
use blocklib_core::hash::{entry_id, fingerprint};
use blocklib_core::model::{Block, EntryMetadata, EntrySource, LibraryEntry};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LibraryError;
use crate::store::{LibraryStore, StoreError};

/// Similarity at or above which a candidate counts as a duplicate of an
/// existing entry of the same type.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq)]
pub struct AdmitOptions {
    pub similarity_threshold: f64,
    /// When false every candidate is inserted and only the store's uniqueness
    /// constraint rejects duplicates.
    pub skip_existing: bool,
    /// Recorded on admitted entries as `original_store_id`.
    pub store_id: Option<String>,
}

impl Default for AdmitOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            skip_existing: true,
            store_id: None,
        }
    }
}

/// Outcome of one admission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AdmitDecision {
    Admitted { entry_id: String },
    DuplicateExact { existing_id: String },
    DuplicateSimilar { existing_id: String, score: f64 },
}

impl AdmitDecision {
    pub fn admitted(&self) -> bool {
        matches!(self, AdmitDecision::Admitted { .. })
    }

    /// Human-readable reason, `None` for admissions.
    pub fn reason(&self) -> Option<String> {
        match self {
            AdmitDecision::Admitted { .. } => None,
            AdmitDecision::DuplicateExact { .. } => Some("Exact match exists".to_string()),
            AdmitDecision::DuplicateSimilar { score, .. } => {
                Some(format!("Similar component exists ({:.0}% match)", score * 100.0))
            }
        }
    }

    /// Stable label used as a telemetry key.
    pub fn label(&self) -> &'static str {
        match self {
            AdmitDecision::Admitted { .. } => "admitted",
            AdmitDecision::DuplicateExact { .. } => "duplicate_exact",
            AdmitDecision::DuplicateSimilar { .. } => "duplicate_similar",
        }
    }
}

pub struct Admission<S> {
    store: S,
    options: AdmitOptions,
    type_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: LibraryStore> Admission<S> {
    pub fn new(store: S) -> Self {
        Self::with_options(store, AdmitOptions::default())
    }

    pub fn with_options(store: S, options: AdmitOptions) -> Self {
        Self {
            store,
            options,
            type_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &AdmitOptions {
        &self.options
    }

    fn type_lock(&self, kind: &str) -> Arc<Mutex<()>> {
        let mut locks = self.type_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(kind.to_string()).or_default())
    }

    /// Admit `block` unless the library already holds it or something close
    /// enough to it.
    pub fn admit_if_novel(
        &self,
        block: &Block,
        source: EntrySource,
    ) -> Result<AdmitDecision, LibraryError> {
        let id = block.identifier();
        let lock = self.type_lock(&id.kind);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.options.skip_existing {
            if let Some(dup) = self.find_duplicate(block)? {
                debug!(component = %id, decision = dup.label(), "admission rejected");
                return Ok(dup);
            }
        }

        let entry = build_entry(block, source, self.options.store_id.clone())?;
        let entry_id = entry.id.clone();
        match self.store.insert(entry) {
            Ok(()) => {
                debug!(component = %id, entry_id = %entry_id, "admitted");
                Ok(AdmitDecision::Admitted { entry_id })
            }
            Err(StoreError::Conflict(_)) => {
                // Someone outside this process won the race.
                let existing_id = self
                    .store
                    .find_exact(&id.kind, &id.variant)?
                    .map(|e| e.id)
                    .unwrap_or(entry_id);
                debug!(component = %id, "insert conflicted, reporting exact duplicate");
                Ok(AdmitDecision::DuplicateExact { existing_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn find_duplicate(&self, block: &Block) -> Result<Option<AdmitDecision>, StoreError> {
        let id = block.identifier();
        if let Some(existing) = self.store.find_exact(&id.kind, &id.variant)? {
            return Ok(Some(AdmitDecision::DuplicateExact {
                existing_id: existing.id,
            }));
        }

        for entry in self.store.find_by_type(&id.kind)? {
            let score = similarity(block, entry.template.as_block());
            if score >= self.options.similarity_threshold {
                return Ok(Some(AdmitDecision::DuplicateSimilar {
                    existing_id: entry.id,
                    score,
                }));
            }
        }
        Ok(None)
    }

    /// Record one use of an entry. Failures are logged and dropped: usage
    /// counts are advisory.
    pub fn record_usage(&self, entry_id: &str) -> Option<u64> {
        match self.store.increment_usage(entry_id) {
            Ok(n) => Some(n),
            Err(e) => {
                warn!(entry_id, error = %e, "failed to record component usage");
                None
            }
        }
    }
}

/// Build the library entry for a freshly admitted block.
pub fn build_entry(
    block: &Block,
    source: EntrySource,
    store_id: Option<String>,
) -> Result<LibraryEntry, LibraryError> {
    let id = block.identifier();
    let template = materialize_template(block);

    let mut metadata = EntryMetadata::new(source, 1);
    metadata.original_store_id = store_id;
    metadata.fingerprint = fingerprint(&template)?;

    Ok(LibraryEntry {
        id: entry_id(&id.kind, &id.variant),
        name: component_name(&id.kind, &id.variant),
        category: categorize(&id.kind).as_str().to_string(),
        editable_fields: compute_editable_fields(&block.data),
        template,
        metadata,
        created_at: Utc::now(),
        thumbnail_url: None,
        kind: id.kind,
        variant_id: id.variant,
    })
}
