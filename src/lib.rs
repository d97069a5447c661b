//! convcheck - house-convention checker for a family of Avalonia/.NET apps
//!
//! convcheck is a CLI tool and library that scans the source trees of several
//! sibling apps and reports where each one drifts from the shared conventions:
//! project layout and metadata, platform isolation, async and exception
//! hygiene, dependency injection, view/logic pairing, localization, ads and
//! namespaces. Matching is line-oriented; nothing is compiled or parsed into
//! an AST.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, rendering)
//! - `config`: Configuration file loading and parsing
//! - `core`: Corpus loading, suppression, pattern engine and fact extractors
//! - `engine`: Runs the rule registries and aggregates findings
//! - `findings`: Severity, category and finding types
//! - `rules`: One module per convention
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod findings;
pub mod rules;
pub mod utils;
