//! Patchset - localization patch overlay tooling
//!
//! Patchset prepares Polish translation patches for Foundry VTT game systems.
//! It downloads a system's scripts, prunes files without translatable text,
//! validates the translated copies, syncs shared translations from upstream
//! and assembles the overlay the plugin applies at init.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Classifier, patch tree passes, overlay model
//! - `issues`: Issue type definitions
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
