//! The document model collaborator contract.
//!
//! The walker needs exactly two capabilities from whatever parsed the
//! source buffer: hand over the default root object, and resolve an
//! indirect reference to its concrete value. Both are expressed by the
//! [`DocumentModel`] trait; the library itself never parses the underlying
//! document format.

use crate::error::Result;
use crate::node::{Label, Node};
use crate::value::{GraphValue, ObjectRef};

/// What a parsed document must provide to the walker.
///
/// Resolution must be deterministic for a given `(num, gen)` pair within
/// one document session. A dangling or invalid reference surfaces as
/// [`Error::UnresolvedReference`](crate::Error::UnresolvedReference), never
/// as a panic.
pub trait DocumentModel {
    /// Returns the document's default root object (the trailer)
    fn default_root(&self) -> Result<GraphValue>;

    /// Resolves an indirect reference to its concrete value.
    ///
    /// The returned value may itself be a reference; the walker follows
    /// such chains up to its depth ceiling.
    fn resolve(&self, reference: ObjectRef) -> Result<GraphValue>;
}

/// Which object a walk starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootSelector {
    /// The document's default root object, labeled `Trailer`
    #[default]
    DocumentDefault,
    /// An explicit object coordinate, labeled `Root`
    Explicit(ObjectRef),
}

impl RootSelector {
    /// Builds the depth-0 root node for this selection.
    ///
    /// An explicit coordinate yields a reference node; the walker resolves
    /// it like any other reference when it is first visited.
    pub fn root_node(&self, model: &dyn DocumentModel) -> Result<Node> {
        match self {
            Self::DocumentDefault => Ok(Node::root(model.default_root()?, Label::key("Trailer"))),
            Self::Explicit(reference) => Ok(Node::root(
                GraphValue::Reference(*reference),
                Label::key("Root"),
            )),
        }
    }
}
