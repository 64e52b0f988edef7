//! File parsers for script and translation files.
//!
//! - `json`: translation document loading and writing
//! - `script`: JS/JSX/TS/TSX parser (uses swc for AST generation)

pub mod json;
pub mod script;
