//! Core analysis engine shared by every rule module.
//!
//! ## Module Structure
//!
//! - `source`: `SourceFile` and path-based role classification
//! - `corpus`: walks an application tree and loads classified files
//! - `context`: `CheckContext` (per app) and `WorkspaceContext` (global)
//! - `suppression`: comment and ignore-marker detection
//! - `patterns`: pattern tables, the line matcher and reporting helpers
//! - `extract`: pure fact extractors used by cross-reference rules

pub mod context;
pub mod corpus;
pub mod extract;
pub mod patterns;
pub mod source;
pub mod suppression;

pub use context::{CheckContext, WorkspaceContext};
pub use corpus::{Corpus, Layout, UnreadableFile};
pub use source::{FileRole, SourceFile};
