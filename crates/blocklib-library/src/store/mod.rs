//! Persistence collaborator.
//!
//! Implementors provide a full snapshot plus the write primitives; lookups,
//! filtering and search have scan-based defaults that a database-backed store
//! can override with real queries.

use std::time::Duration;

use blocklib_core::model::{ComponentId, LibraryEntry};

use crate::query::{self, LibraryQuery};

pub mod file;
pub mod memory;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `(type, variant_id)` is already taken.
    #[error("component '{0}' already exists in the library")]
    Conflict(ComponentId),

    #[error("library entry '{0}' not found")]
    NotFound(String),

    /// Raised by stores that enforce a deadline. Never retried by callers in
    /// this crate.
    #[error("library store timed out after {0:?}")]
    Timeout(Duration),

    #[error("library store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("library store data is invalid: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("library store error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Inserted,
    Replaced,
}

pub trait LibraryStore: Send + Sync {
    /// Every entry, in insertion order.
    fn all(&self) -> StoreResult<Vec<LibraryEntry>>;

    /// Insert a new entry. Fails with [`StoreError::Conflict`] when the
    /// `(type, variant_id)` pair is taken.
    fn insert(&self, entry: LibraryEntry) -> StoreResult<()>;

    /// Insert, or replace the entry with the same `(type, variant_id)`.
    fn upsert(&self, entry: LibraryEntry) -> StoreResult<Upserted>;

    /// Bump `usage_count` and return the new count.
    fn increment_usage(&self, id: &str) -> StoreResult<u64>;

    fn get(&self, id: &str) -> StoreResult<Option<LibraryEntry>> {
        Ok(self.all()?.into_iter().find(|e| e.id == id))
    }

    fn find_exact(&self, kind: &str, variant_id: &str) -> StoreResult<Option<LibraryEntry>> {
        Ok(self
            .all()?
            .into_iter()
            .find(|e| e.kind == kind && e.variant_id == variant_id))
    }

    /// Entries of one type, templates included.
    fn find_by_type(&self, kind: &str) -> StoreResult<Vec<LibraryEntry>> {
        Ok(self.all()?.into_iter().filter(|e| e.kind == kind).collect())
    }

    fn list(&self, q: &LibraryQuery) -> StoreResult<Vec<LibraryEntry>> {
        Ok(query::select(self.all()?, q))
    }

    fn search(&self, term: &str) -> StoreResult<Vec<LibraryEntry>> {
        Ok(query::search(self.all()?, term, query::SEARCH_LIMIT))
    }
}

impl<S: LibraryStore + ?Sized> LibraryStore for &S {
    fn all(&self) -> StoreResult<Vec<LibraryEntry>> {
        (**self).all()
    }

    fn insert(&self, entry: LibraryEntry) -> StoreResult<()> {
        (**self).insert(entry)
    }

    fn upsert(&self, entry: LibraryEntry) -> StoreResult<Upserted> {
        (**self).upsert(entry)
    }

    fn increment_usage(&self, id: &str) -> StoreResult<u64> {
        (**self).increment_usage(id)
    }

    fn get(&self, id: &str) -> StoreResult<Option<LibraryEntry>> {
        (**self).get(id)
    }

    fn find_exact(&self, kind: &str, variant_id: &str) -> StoreResult<Option<LibraryEntry>> {
        (**self).find_exact(kind, variant_id)
    }

    fn find_by_type(&self, kind: &str) -> StoreResult<Vec<LibraryEntry>> {
        (**self).find_by_type(kind)
    }

    fn list(&self, q: &LibraryQuery) -> StoreResult<Vec<LibraryEntry>> {
        (**self).list(q)
    }

    fn search(&self, term: &str) -> StoreResult<Vec<LibraryEntry>> {
        (**self).search(term)
    }
}

/// Shared write logic for snapshot-style stores.
pub(crate) fn insert_into(entries: &mut Vec<LibraryEntry>, entry: LibraryEntry) -> StoreResult<()> {
    if entries
        .iter()
        .any(|e| e.kind == entry.kind && e.variant_id == entry.variant_id)
    {
        return Err(StoreError::Conflict(entry.component_id()));
    }
    entries.push(entry);
    Ok(())
}

/// Replacing keeps the stored position, `usage_count` and `created_at`: usage
/// only ever grows.
pub(crate) fn upsert_into(entries: &mut Vec<LibraryEntry>, mut entry: LibraryEntry) -> Upserted {
    match entries
        .iter_mut()
        .find(|e| e.kind == entry.kind && e.variant_id == entry.variant_id)
    {
        Some(existing) => {
            entry.metadata.usage_count = entry
                .metadata
                .usage_count
                .max(existing.metadata.usage_count);
            entry.created_at = existing.created_at;
            *existing = entry;
            Upserted::Replaced
        }
        None => {
            entries.push(entry);
            Upserted::Inserted
        }
    }
}

pub(crate) fn increment_in(entries: &mut [LibraryEntry], id: &str) -> StoreResult<u64> {
    let entry = entries
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    entry.metadata.usage_count += 1;
    Ok(entry.metadata.usage_count)
}
