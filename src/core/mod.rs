//! Patch set engine.
//!
//! ## Module Structure
//!
//! - `parsers`: script (swc) and translation document (JSON) parsing
//! - `classify`: does a script contain any string or template literal
//! - `file_scanner`: recursive discovery of script files
//! - `tidy`, `duplicates`, `validate`: passes over a patch tree
//! - `download`: upstream clone and patch tree preparation
//! - `sync`: remote translation merge
//! - `overlay`: host configuration model and the patches applied to it
//! - `build`: assembly of the distributable overlay

pub mod build;
pub mod classify;
pub mod download;
pub mod duplicates;
pub mod file_scanner;
pub mod overlay;
pub mod parsers;
pub mod sync;
pub mod tidy;
pub mod validate;

pub use classify::{has_string_literal, has_string_literal_in_content};
pub use download::PackagePaths;
