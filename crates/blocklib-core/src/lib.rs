#![doc = r#"
⚠️ INTERNAL CRATE – NOT A STABLE API

This crate is an internal implementation detail of the blocklib project.

Do NOT depend on this crate directly.
Use `blocklib-io` instead.
"#]

pub mod canonical_json;
pub mod hash;
pub mod label;
pub mod model;
