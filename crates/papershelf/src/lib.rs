//! Public facade crate for `papershelf`.
//!
//! This crate contains no IO. It re-exports the catalog types, filter engine,
//! category registry and citation formatter from `papershelf-core`.

pub use papershelf_core::*;
