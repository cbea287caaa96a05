//! One-line text rendering of nodes.
//!
//! The formatter turns a [`Node`] into a single human-readable description,
//! independent of where the node sits in a traversal. Kinds the formatter
//! does not recognize are governed by an explicit [`UnknownPolicy`] rather
//! than a silent default.

use crate::error::{Error, Result};
use crate::node::Node;
use crate::value::{GraphValue, ObjectRef};

/// Byte-order mark announcing UTF-16BE text in a string value
const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];

/// What to do with a value kind the formatter has no rendering for
/// (an unresolved reference or the null object).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownPolicy {
    /// Fail with [`Error::UnknownValueKind`]
    Strict,
    /// Serialize a best-effort JSON representation, without a label
    #[default]
    BestEffort,
}

/// Renders nodes to one-line descriptions
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    policy: UnknownPolicy,
}

impl Formatter {
    /// Creates a formatter with the default (best-effort) policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the given unknown-kind policy
    pub fn with_policy(policy: UnknownPolicy) -> Self {
        Self { policy }
    }

    /// Renders one node to its display line.
    ///
    /// If the node was obtained by resolving an indirect reference, the
    /// reference identity is appended as ` [id: <num>, gen: <gen>]`.
    pub fn line(&self, node: &Node) -> Result<String> {
        let label = &node.label;
        let mut text = match &node.value {
            GraphValue::Dict(_) => format!("{label} (dict)"),
            GraphValue::Array(_) => format!("{label} (array)"),
            GraphValue::Stream(_) => format!("{label} (stream)"),
            GraphValue::Name(name) => format!("{label} = /{name}"),
            GraphValue::Number(number) => format!("{label} = {number}"),
            GraphValue::Boolean(boolean) => format!("{label} = {boolean}"),
            GraphValue::String(bytes) => format!("{label} = {}", json_quote(&decode_text(bytes))),
            GraphValue::StreamContents(_) => "<contents>".to_string(),
            GraphValue::Reference(_) | GraphValue::Null => match self.policy {
                UnknownPolicy::Strict => {
                    return Err(Error::unknown_value_kind(
                        node.value.kind(),
                        label.to_string(),
                    ));
                }
                UnknownPolicy::BestEffort => best_effort(&node.value),
            },
        };

        if let Some(origin) = node.origin {
            text.push_str(&origin_suffix(origin));
        }
        Ok(text)
    }
}

/// Indents a trail line: the marker repeated `depth` times, a space, then
/// the node text.
pub fn indented(marker: &str, depth: usize, text: &str) -> String {
    format!("{} {}", marker.repeat(depth), text)
}

fn origin_suffix(origin: ObjectRef) -> String {
    format!(" [id: {}, gen: {}]", origin.num, origin.gen)
}

/// Decodes string bytes for display.
///
/// Bytes starting with the UTF-16BE byte-order mark are decoded as
/// big-endian UTF-16 code units (an odd trailing byte is dropped);
/// everything else is read byte-per-character.
fn decode_text(bytes: &[u8]) -> String {
    if bytes.starts_with(&UTF16BE_BOM) {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

fn json_quote(text: &str) -> String {
    serde_json::to_string(text).expect("string serialization cannot fail")
}

/// Best-effort serialization for kinds without a proper rendering
fn best_effort(value: &GraphValue) -> String {
    match value {
        GraphValue::Null => "null".to_string(),
        GraphValue::Reference(r) => format!("{{\"num\":{},\"gen\":{}}}", r.num, r.gen),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Label;
    use pretty_assertions::assert_eq;

    fn node(value: GraphValue, label: &str) -> Node {
        Node::new(value, Label::key(label), 2)
    }

    #[test]
    fn test_container_lines() {
        let formatter = Formatter::new();
        assert_eq!(
            formatter.line(&node(GraphValue::dict(vec![]), "Root")).unwrap(),
            "Root (dict)"
        );
        assert_eq!(
            formatter.line(&node(GraphValue::array(vec![]), "Kids")).unwrap(),
            "Kids (array)"
        );
        assert_eq!(
            formatter
                .line(&node(GraphValue::stream(vec![], vec![]), "S"))
                .unwrap(),
            "S (stream)"
        );
    }

    #[test]
    fn test_scalar_lines() {
        let formatter = Formatter::new();
        assert_eq!(
            formatter.line(&node(GraphValue::name("Pages"), "Type")).unwrap(),
            "Type = /Pages"
        );
        assert_eq!(
            formatter.line(&node(GraphValue::Number(1.0), "GPTS")).unwrap(),
            "GPTS = 1"
        );
        assert_eq!(
            formatter.line(&node(GraphValue::Number(2.5), "V")).unwrap(),
            "V = 2.5"
        );
        assert_eq!(
            formatter.line(&node(GraphValue::Boolean(true), "Open")).unwrap(),
            "Open = true"
        );
    }

    #[test]
    fn test_index_label() {
        let formatter = Formatter::new();
        let n = Node::new(GraphValue::name("Foo"), Label::Index(0), 2);
        assert_eq!(formatter.line(&n).unwrap(), "0 = /Foo");
    }

    #[test]
    fn test_plain_string_quoted() {
        let formatter = Formatter::new();
        assert_eq!(
            formatter
                .line(&node(GraphValue::string(*b"hello"), "T"))
                .unwrap(),
            "T = \"hello\""
        );
    }

    #[test]
    fn test_utf16be_string_decoded() {
        // BOM + "Hi" in big-endian UTF-16
        let bytes = vec![0xFE, 0xFF, 0x00, b'H', 0x00, b'i'];
        let formatter = Formatter::new();
        assert_eq!(
            formatter.line(&node(GraphValue::string(bytes), "T")).unwrap(),
            "T = \"Hi\""
        );
    }

    #[test]
    fn test_utf16be_non_ascii() {
        // BOM + U+00E9 (é)
        let bytes = vec![0xFE, 0xFF, 0x00, 0xE9];
        assert_eq!(decode_text(&bytes), "é");
        // Without the BOM the same bytes read byte-per-character
        assert_eq!(decode_text(&[0x00, 0xE9]), "\u{0}é");
    }

    #[test]
    fn test_stream_contents_ignores_label() {
        let formatter = Formatter::new();
        let stream = GraphValue::stream(vec![], vec![]);
        let GraphValue::Stream(inner) = stream else {
            unreachable!()
        };
        let n = node(GraphValue::StreamContents(inner), "Contents");
        assert_eq!(formatter.line(&n).unwrap(), "<contents>");
    }

    #[test]
    fn test_origin_suffix_appended() {
        let formatter = Formatter::new();
        let n = Node::new(GraphValue::Reference(ObjectRef::new(2, 0)), Label::key("Val"), 1)
            .resolved(GraphValue::name("X"), ObjectRef::new(2, 0));
        assert_eq!(formatter.line(&n).unwrap(), "Val = /X [id: 2, gen: 0]");
    }

    #[test]
    fn test_strict_rejects_unknown_kinds() {
        let formatter = Formatter::with_policy(UnknownPolicy::Strict);
        let err = formatter.line(&node(GraphValue::Null, "N")).unwrap_err();
        assert!(matches!(err, Error::UnknownValueKind { kind: "null", .. }));
        let err = formatter
            .line(&node(GraphValue::Reference(ObjectRef::new(5, 0)), "R"))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownValueKind { kind: "reference", .. }));
    }

    #[test]
    fn test_best_effort_serializes_unknown_kinds() {
        let formatter = Formatter::new();
        assert_eq!(formatter.line(&node(GraphValue::Null, "N")).unwrap(), "null");
        assert_eq!(
            formatter
                .line(&node(GraphValue::Reference(ObjectRef::new(5, 2)), "R"))
                .unwrap(),
            "{\"num\":5,\"gen\":2}"
        );
    }

    #[test]
    fn test_indented() {
        assert_eq!(indented("-", 2, "GPTS = 1"), "-- GPTS = 1");
        assert_eq!(indented("-", 0, "Trailer (dict)"), " Trailer (dict)");
        assert_eq!(indented("*", 3, "x"), "*** x");
    }
}
