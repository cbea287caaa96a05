//! Error types for the pdfwalk-core library.
//!
//! This module provides error handling using the `thiserror` crate, with
//! distinct variants for the three failure modes a walk can hit: the source
//! buffer failing to parse at all, a dangling indirect reference, and a
//! value kind the formatter refuses to render.

use thiserror::Error;

use crate::value::ObjectRef;

/// Result type alias for pdfwalk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all pdfwalk operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The document model failed to parse the source buffer.
    ///
    /// Fatal to the whole walk; surfaced before any traversal begins.
    #[error("malformed source: {details}")]
    MalformedSource {
        /// Description of the parse failure
        details: String,
    },

    /// The document model could not resolve an indirect reference
    #[error("unresolved reference {num} {gen} R: {details}")]
    UnresolvedReference {
        /// Object number of the dangling reference
        num: u32,
        /// Generation number of the dangling reference
        gen: u16,
        /// Description of the resolution failure
        details: String,
    },

    /// The formatter encountered a value kind it does not render.
    ///
    /// Raised only under [`UnknownPolicy::Strict`](crate::UnknownPolicy);
    /// the best-effort policy serializes such values instead.
    #[error("unknown value kind '{kind}' at node '{label}'")]
    UnknownValueKind {
        /// Kind tag of the offending value
        kind: &'static str,
        /// Label of the node that carried it
        label: String,
    },

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates a new malformed source error
    pub fn malformed_source(details: impl Into<String>) -> Self {
        Self::MalformedSource {
            details: details.into(),
        }
    }

    /// Creates a new unresolved reference error
    pub fn unresolved_reference(reference: ObjectRef, details: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            num: reference.num,
            gen: reference.gen,
            details: details.into(),
        }
    }

    /// Creates a new unknown value kind error
    pub fn unknown_value_kind(kind: &'static str, label: impl Into<String>) -> Self {
        Self::UnknownValueKind {
            kind,
            label: label.into(),
        }
    }

    /// Creates a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this error concerns a single node rather than the
    /// whole walk
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedReference { .. } | Self::UnknownValueKind { .. }
        )
    }
}
