//! # pdfwalk-core
//!
//! A library for walking and annotating PDF object graphs.
//!
//! This crate provides the core functionality for:
//! - Expanding an already-parsed object graph node by node, on demand
//! - Resolving indirect references lazily through a document model
//! - Rendering a human-readable trail, armed by a sentinel label
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`value`]: The object graph value model
//! - [`node`]: Traversal-time node wrapper and lazy child expansion
//! - [`format`]: One-line text rendering of nodes
//! - [`model`]: The document model collaborator contract
//! - [`walk`]: The traversal engine
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use pdfwalk_core::{DocumentModel, RootSelector, TrailBuffer, Walker};
//!
//! fn print_trail(model: &dyn DocumentModel) -> pdfwalk_core::Result<()> {
//!     let walker = Walker::new(model);
//!     let mut buffer = TrailBuffer::new();
//!     let summary = walker.walk(RootSelector::DocumentDefault, &mut buffer)?;
//!     for line in buffer.lines() {
//!         println!("{}", pdfwalk_core::indented("-", line.depth, &line.text));
//!     }
//!     println!("{} nodes visited", summary.visited);
//!     Ok(())
//! }
//! ```
//!
//! ## Extensibility
//!
//! The library provides several traits for customization:
//!
//! - [`DocumentModel`]: Plug in the component that parses the source bytes
//! - [`Visitor`]: Intercept every visited node and gate expansion
//! - [`TrailSink`]: Choose where emitted trail lines go

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod format;
pub mod model;
pub mod node;
pub mod value;
pub mod walk;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use format::{indented, Formatter, UnknownPolicy};
pub use model::{DocumentModel, RootSelector};
pub use node::{Label, Node};
pub use value::{DictEntries, GraphValue, ObjectRef, StreamValue};
pub use walk::{
    ExpandAll, LogSink, Recurse, ReferencePolicy, SkippedNode, TrailBuffer, TrailLine, TrailSink,
    TrailState, Visitor, WalkSummary, Walker, WalkerConfig,
};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default depth ceiling: nodes deeper than this are never expanded
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Default sentinel label: its first appearance arms trail emission
pub const DEFAULT_SENTINEL: &str = "GPTS";
