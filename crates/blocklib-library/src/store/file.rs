//! Whole-library JSON file store.
//!
//! The file is one document `{ "version": 1, "entries": [...] }`. Every write
//! rewrites it through a temporary sibling and a rename, so readers never see
//! a half-written library.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use blocklib_core::model::LibraryEntry;
use serde::{Deserialize, Serialize};

use super::{
    LibraryStore, StoreError, StoreResult, Upserted, increment_in, insert_into, upsert_into,
};

/// On-disk format version of the library file.
pub const LIBRARY_FILE_V: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LibraryFile {
    version: u32,
    #[serde(default)]
    entries: Vec<LibraryEntry>,
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// A store backed by `path`. The file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StoreResult<Vec<LibraryEntry>> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let file: LibraryFile = serde_json::from_slice(&bytes)?;
        if file.version != LIBRARY_FILE_V {
            return Err(StoreError::Backend(format!(
                "unsupported library file version {} (expected {LIBRARY_FILE_V})",
                file.version
            )));
        }
        Ok(file.entries)
    }

    fn save(&self, entries: Vec<LibraryEntry>) -> StoreResult<()> {
        let file = LibraryFile {
            version: LIBRARY_FILE_V,
            entries,
        };
        let mut content = serde_json::to_vec_pretty(&file)?;
        content.push(b'\n');

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "library.json".to_string());
        let tmp = dir.join(format!(".{name}-{}.tmp", uuid::Uuid::new_v4()));
        fs::write(&tmp, &content)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    fn modify<T>(&self, f: impl FnOnce(&mut Vec<LibraryEntry>) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load()?;
        let out = f(&mut entries)?;
        self.save(entries)?;
        Ok(out)
    }
}

impl LibraryStore for JsonFileStore {
    fn all(&self) -> StoreResult<Vec<LibraryEntry>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load()
    }

    fn insert(&self, entry: LibraryEntry) -> StoreResult<()> {
        self.modify(|entries| insert_into(entries, entry))
    }

    fn upsert(&self, entry: LibraryEntry) -> StoreResult<Upserted> {
        self.modify(|entries| Ok(upsert_into(entries, entry)))
    }

    fn increment_usage(&self, id: &str) -> StoreResult<u64> {
        self.modify(|entries| increment_in(entries, id))
    }
}
