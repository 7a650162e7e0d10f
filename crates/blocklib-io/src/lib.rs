//! `blocklib-io` is the single supported public entrypoint for the component
//! template engine: block and template types, field inference, template
//! materialization and hydration, similarity, and the component library.
//!
//! This crate contains no rendering, crawling or generation logic.

// Consumers SHOULD import from `blocklib_io::prelude::*`. Anything not
// re-exported via the prelude is internal and may change without notice.

#[doc(hidden)]
pub mod core {
    pub use blocklib_core::canonical_json;
    pub use blocklib_core::hash::{entry_id, fingerprint};
    pub use blocklib_core::label::{format_label, humanize_field_name};
    pub use blocklib_core::model::{
        Block, ComponentId, EditableField, EntryMetadata, EntrySource, FieldKind,
        LibraryEntry, MalformedBlock, Page, Template, ValueMap,
    };
}

#[doc(hidden)]
pub mod analyze {
    pub use blocklib_analyze::defaults::{
        infer_field_kind, infer_fields_from_defaults, infer_fields_from_names,
    };
    pub use blocklib_analyze::{
        Classifier, FieldRule, IDENTITY_FLOOR, Placeholder, PlaceholderHint,
        analyze_block_structure, classify, compute_editable_fields, extract_values,
        hydrate_template, is_list_layout, materialize_template, remap_for_layout, similarity,
    };
}

#[doc(hidden)]
pub mod catalog {
    pub use blocklib_catalog::{Category, categorize, component_name, seed_category};
}

#[doc(hidden)]
pub mod library {
    pub use blocklib_library::query::{LibraryQuery, SortBy, SortOrder};
    pub use blocklib_library::seed::{SeedError, SeedManifest, SeedOption, SeedOptions, SeedSummary};
    pub use blocklib_library::{
        Admission, AdmitDecision, AdmitOptions, DEFAULT_SIMILARITY_THRESHOLD,
        ExtractionSummary, JsonFileStore, LibraryError, LibraryStore, MemoryStore,
        StoreError, build_entry, seed_library,
    };
}

/// Parsing helpers with actionable diagnostics.
pub mod page_json;

/// Format version constants.
pub mod version;

/// Convenience prelude for consumers.
pub mod prelude {
    pub use crate::analyze::{
        Classifier, compute_editable_fields, extract_values, hydrate_template,
        materialize_template, remap_for_layout, similarity,
    };
    pub use crate::catalog::{Category, categorize, component_name};
    pub use crate::core::{
        Block, ComponentId, EditableField, EntrySource, FieldKind, LibraryEntry, Page,
        Template, ValueMap,
    };
    pub use crate::library::{
        Admission, AdmitDecision, AdmitOptions, ExtractionSummary, JsonFileStore,
        LibraryQuery, LibraryStore, MemoryStore, SeedManifest, SeedOptions, seed_library,
    };
    pub use crate::page_json::PageJsonError;
}
