//! The object graph value model.
//!
//! [`GraphValue`] is the tagged union a document model hands to the walker:
//! dictionaries, arrays, streams, indirect references, and scalars. Values
//! are immutable once built; container payloads are reference-counted so
//! that cloning a value (or deriving a child node from it) shares structure
//! with the parent instead of deep-copying the object store.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Identity of an indirect object: object number plus generation number.
///
/// A reference stands in for an object stored elsewhere in the document;
/// it must be resolved through the document model before its structure can
/// be inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub num: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Creates a new reference identity
    pub fn new(num: u32, gen: u16) -> Self {
        Self { num, gen }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.num, self.gen)
    }
}

impl FromStr for ObjectRef {
    type Err = Error;

    /// Parses a `num,gen` coordinate pair, e.g. `12,0`.
    fn from_str(s: &str) -> Result<Self> {
        let (num, gen) = s
            .split_once(',')
            .ok_or_else(|| Error::internal(format!("invalid object coordinate '{s}': expected 'num,gen'")))?;
        let num = num
            .trim()
            .parse::<u32>()
            .map_err(|e| Error::internal(format!("invalid object number '{num}': {e}")))?;
        let gen = gen
            .trim()
            .parse::<u16>()
            .map_err(|e| Error::internal(format!("invalid generation number '{gen}': {e}")))?;
        Ok(Self { num, gen })
    }
}

/// Ordered dictionary entries, in the document's insertion order
pub type DictEntries = Vec<(String, GraphValue)>;

/// A stream object: a dictionary plus an opaque byte payload
#[derive(Debug, Clone, PartialEq)]
pub struct StreamValue {
    /// The stream dictionary
    pub dict: DictEntries,
    /// The raw payload bytes
    pub data: Vec<u8>,
}

/// One value in the object graph.
///
/// The first nine variants mirror what a document model can produce. The
/// [`StreamContents`](GraphValue::StreamContents) variant is synthetic:
/// document models never emit it, node expansion injects it as the trailing
/// `Contents` child of a stream so the payload shows up in the traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    /// Ordered name-to-value mapping
    Dict(Arc<DictEntries>),
    /// Ordered sequence of values
    Array(Arc<Vec<GraphValue>>),
    /// Dictionary plus opaque byte payload
    Stream(Arc<StreamValue>),
    /// Indirect reference, resolvable through the document model
    Reference(ObjectRef),
    /// Interned symbolic atom
    Name(String),
    /// Numeric value (integral values display without a fraction)
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Raw string bytes, possibly UTF-16BE text with a leading BOM
    String(Arc<[u8]>),
    /// The null object
    Null,
    /// Synthetic marker for a stream's payload; carries no children
    StreamContents(Arc<StreamValue>),
}

impl GraphValue {
    /// Builds a dictionary value from its entries
    pub fn dict(entries: DictEntries) -> Self {
        Self::Dict(Arc::new(entries))
    }

    /// Builds an array value from its elements
    pub fn array(items: Vec<GraphValue>) -> Self {
        Self::Array(Arc::new(items))
    }

    /// Builds a stream value from its dictionary and payload
    pub fn stream(dict: DictEntries, data: Vec<u8>) -> Self {
        Self::Stream(Arc::new(StreamValue { dict, data }))
    }

    /// Builds a string value from raw bytes
    pub fn string(bytes: impl Into<Vec<u8>>) -> Self {
        Self::String(Arc::from(bytes.into()))
    }

    /// Builds a name value
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Returns the kind tag for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Dict(_) => "dict",
            Self::Array(_) => "array",
            Self::Stream(_) => "stream",
            Self::Reference(_) => "reference",
            Self::Name(_) => "name",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::String(_) => "string",
            Self::Null => "null",
            Self::StreamContents(_) => "stream contents",
        }
    }

    /// Returns true if the value is an indirect reference
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}
