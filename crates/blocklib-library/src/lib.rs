//! The persisted component library and the logic that decides what enters it.
//!
//! Storage is abstracted behind [`store::LibraryStore`]; [`admission::Admission`]
//! runs the dedup-then-insert flow on top of any store.

pub mod admission;
pub mod error;
pub mod extract;
pub mod query;
pub mod seed;
pub mod store;

pub use admission::{Admission, AdmitDecision, AdmitOptions, DEFAULT_SIMILARITY_THRESHOLD, build_entry};
pub use error::LibraryError;
pub use extract::ExtractionSummary;
pub use query::{LibraryQuery, SortBy, SortOrder};
pub use seed::{SeedManifest, SeedOptions, SeedSummary, seed_library};
pub use store::{LibraryStore, StoreError, Upserted, file::JsonFileStore, memory::MemoryStore};
