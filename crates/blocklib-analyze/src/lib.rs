//! Schema inference and template transforms over arbitrary block JSON.
//!
//! Everything here is a pure function of its input: no I/O, no shared state.

pub mod classify;
pub mod defaults;
pub mod placeholder;
pub mod remap;
pub mod similarity;
pub mod template;
pub mod walk;

pub use classify::{Classifier, FieldRule, classify};
pub use placeholder::{Placeholder, PlaceholderHint};
pub use remap::{is_list_layout, remap_for_layout};
pub use similarity::{IDENTITY_FLOOR, similarity};
pub use template::{extract_values, hydrate_template, materialize_template};
pub use walk::{analyze_block_structure, compute_editable_fields};
