use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use std::time::Duration;

use blocklib_core::model::LibraryEntry;

use super::{
    LibraryStore, StoreError, StoreResult, Upserted, increment_in, insert_into, upsert_into,
};

/// In-memory store for tests and one-shot CLI runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<LibraryEntry>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    timeout: Mutex<Option<Duration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<LibraryEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
            ..Self::default()
        }
    }

    /// Make every subsequent read fail with [`StoreError::Backend`].
    pub fn simulate_read_error(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail with [`StoreError::Backend`].
    pub fn simulate_write_error(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent operation fail with [`StoreError::Timeout`], as a
    /// store whose deadline of `after` expired would. `None` clears it.
    pub fn simulate_timeout(&self, after: Option<Duration>) {
        *self.timeout.lock().unwrap_or_else(PoisonError::into_inner) = after;
    }

    fn check_deadline(&self) -> StoreResult<()> {
        match *self.timeout.lock().unwrap_or_else(PoisonError::into_inner) {
            Some(after) => Err(StoreError::Timeout(after)),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_read(&self) -> StoreResult<()> {
        self.check_deadline()?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated read error".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> StoreResult<()> {
        self.check_deadline()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated write error".into()));
        }
        Ok(())
    }
}

impl LibraryStore for MemoryStore {
    fn all(&self) -> StoreResult<Vec<LibraryEntry>> {
        self.check_read()?;
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn insert(&self, entry: LibraryEntry) -> StoreResult<()> {
        self.check_write()?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        insert_into(&mut entries, entry)
    }

    fn upsert(&self, entry: LibraryEntry) -> StoreResult<Upserted> {
        self.check_write()?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Ok(upsert_into(&mut entries, entry))
    }

    fn increment_usage(&self, id: &str) -> StoreResult<u64> {
        self.check_write()?;
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        increment_in(&mut entries, id)
    }
}
