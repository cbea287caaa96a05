//! Traversal-time node wrapper.
//!
//! A [`Node`] pairs a [`GraphValue`] with the label it was reached under,
//! its traversal depth, and (after reference resolution) the reference it
//! was obtained from. [`Node::children`] expands a value one level on
//! demand, without pre-walking the rest of the graph.

use std::fmt;

use crate::value::{GraphValue, ObjectRef};

/// How a node is addressed from its parent: a dictionary key or an array index
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// Dictionary (or stream dictionary) key
    Key(String),
    /// 0-based array index
    Index(usize),
}

impl Label {
    /// Creates a key label
    pub fn key(key: impl Into<String>) -> Self {
        Self::Key(key.into())
    }

    /// Returns true if this is a key label equal to `key`
    pub fn is_key(&self, key: &str) -> bool {
        matches!(self, Self::Key(k) if k == key)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One node of the traversal: a value plus where and how deep it sits.
///
/// `depth` increases by exactly 1 from parent to child. `origin` is set only
/// when the value was obtained by resolving an indirect reference; it is
/// used purely for display, never for identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// The value at this position
    pub value: GraphValue,
    /// The label this node was reached under
    pub label: Label,
    /// Traversal depth, 0 at the root
    pub depth: usize,
    /// The reference this value was resolved from, if any
    pub origin: Option<ObjectRef>,
}

impl Node {
    /// Creates a node at the given depth
    pub fn new(value: GraphValue, label: Label, depth: usize) -> Self {
        Self {
            value,
            label,
            depth,
            origin: None,
        }
    }

    /// Creates a depth-0 root node
    pub fn root(value: GraphValue, label: Label) -> Self {
        Self::new(value, label, 0)
    }

    /// Replaces the value with its resolved form, recording the reference
    /// it came from
    pub fn resolved(self, value: GraphValue, origin: ObjectRef) -> Self {
        Self {
            value,
            label: self.label,
            depth: self.depth,
            origin: Some(origin),
        }
    }

    /// Expands this node's value one level.
    ///
    /// Dictionary and stream values produce one child per entry in the
    /// mapping's insertion order; a stream additionally appends a single
    /// synthetic `Contents` child wrapping its payload. Arrays produce one
    /// child per element, labeled by index. Everything else (references,
    /// scalars, stream contents) has no children.
    ///
    /// Pure and idempotent: safe to call repeatedly, nothing is cached.
    pub fn children(&self) -> Vec<Node> {
        let depth = self.depth + 1;
        match &self.value {
            GraphValue::Dict(entries) => entries
                .iter()
                .map(|(key, value)| Node::new(value.clone(), Label::key(key), depth))
                .collect(),
            GraphValue::Stream(stream) => {
                let mut children: Vec<Node> = stream
                    .dict
                    .iter()
                    .map(|(key, value)| Node::new(value.clone(), Label::key(key), depth))
                    .collect();
                children.push(Node::new(
                    GraphValue::StreamContents(stream.clone()),
                    Label::key("Contents"),
                    depth,
                ));
                children
            }
            GraphValue::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, value)| Node::new(value.clone(), Label::Index(index), depth))
                .collect(),
            _ => Vec::new(),
        }
    }
}
