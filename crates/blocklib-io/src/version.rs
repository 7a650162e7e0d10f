//! Format version constants.

/// On-disk library document version written by `JsonFileStore`.
pub const LIBRARY_FILE_V: u32 = blocklib_library::store::file::LIBRARY_FILE_V;

/// JSON Schema bundle version for the schemas under `schemas/`; every schema
/// `$id` ends in `.v<SCHEMA_BUNDLE_V>.schema.json`.
///
/// Bump this if the schema constraints change.
pub const SCHEMA_BUNDLE_V: u8 = 1;
