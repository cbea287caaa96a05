//! lopdf-backed document model.
//!
//! Adapts a parsed [`lopdf::Document`] to the core [`DocumentModel`]
//! contract: the trailer dictionary is the default root, and indirect
//! references resolve through the document's cross-reference table.
//! Conversion keeps references unresolved, so the walker still drives
//! resolution lazily.

use lopdf::{Dictionary, Document, Object};
use pdfwalk_core::{DictEntries, DocumentModel, Error, GraphValue, ObjectRef, Result};

/// A parsed PDF document exposed to the walker
#[derive(Debug)]
pub struct LopdfModel {
    doc: Document,
}

impl LopdfModel {
    /// Parses a raw PDF buffer.
    ///
    /// A buffer the parser rejects is fatal to the whole walk and surfaces
    /// as [`Error::MalformedSource`] before any traversal begins.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let doc = Document::load_mem(data).map_err(|e| Error::malformed_source(e.to_string()))?;
        Ok(Self { doc })
    }

    /// Wraps an already-parsed document
    pub fn from_document(doc: Document) -> Self {
        Self { doc }
    }

    /// Access the underlying lopdf document
    pub fn document(&self) -> &Document {
        &self.doc
    }
}

impl DocumentModel for LopdfModel {
    fn default_root(&self) -> Result<GraphValue> {
        Ok(GraphValue::dict(convert_dict(&self.doc.trailer)))
    }

    fn resolve(&self, reference: ObjectRef) -> Result<GraphValue> {
        self.doc
            .get_object((reference.num, reference.gen))
            .map(convert)
            .map_err(|e| Error::unresolved_reference(reference, e.to_string()))
    }
}

/// Converts one lopdf object into the walker's value model
fn convert(object: &Object) -> GraphValue {
    match object {
        Object::Null => GraphValue::Null,
        Object::Boolean(b) => GraphValue::Boolean(*b),
        Object::Integer(i) => GraphValue::Number(*i as f64),
        Object::Real(r) => GraphValue::Number(f64::from(*r)),
        Object::Name(name) => GraphValue::Name(String::from_utf8_lossy(name).into_owned()),
        Object::String(bytes, _) => GraphValue::string(bytes.clone()),
        Object::Array(items) => GraphValue::array(items.iter().map(convert).collect()),
        Object::Dictionary(dict) => GraphValue::dict(convert_dict(dict)),
        Object::Stream(stream) => {
            GraphValue::stream(convert_dict(&stream.dict), stream.content.clone())
        }
        Object::Reference(id) => GraphValue::Reference(ObjectRef::new(id.0, id.1)),
    }
}

fn convert_dict(dict: &Dictionary) -> DictEntries {
    dict.iter()
        .map(|(key, value)| (String::from_utf8_lossy(key).into_owned(), convert(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_root_is_trailer() {
        let mut doc = Document::with_version("1.5");
        let id = doc.add_object(Object::Integer(42));
        doc.trailer.set("Answer", Object::Reference(id));

        let model = LopdfModel::from_document(doc);
        let GraphValue::Dict(entries) = model.default_root().unwrap() else {
            panic!("expected a dictionary root");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "Answer");
        assert_eq!(
            entries[0].1,
            GraphValue::Reference(ObjectRef::new(id.0, id.1))
        );
    }

    #[test]
    fn test_resolve_known_object() {
        let mut doc = Document::with_version("1.5");
        let id = doc.add_object(Object::Integer(42));

        let model = LopdfModel::from_document(doc);
        let value = model.resolve(ObjectRef::new(id.0, id.1)).unwrap();
        assert_eq!(value, GraphValue::Number(42.0));
    }

    #[test]
    fn test_resolve_missing_object() {
        let model = LopdfModel::from_document(Document::with_version("1.5"));
        let err = model.resolve(ObjectRef::new(99, 0)).unwrap_err();
        assert!(matches!(err, Error::UnresolvedReference { num: 99, .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_convert_nested_values() {
        let object = Object::Array(vec![
            Object::Null,
            Object::Boolean(true),
            Object::Real(2.5),
            Object::Name(b"Foo".to_vec()),
            Object::string_literal("hi"),
            Object::Dictionary(lopdf::dictionary! { "K" => Object::Integer(7) }),
        ]);

        let GraphValue::Array(items) = convert(&object) else {
            panic!("expected an array");
        };
        assert_eq!(items[0], GraphValue::Null);
        assert_eq!(items[1], GraphValue::Boolean(true));
        assert_eq!(items[2], GraphValue::Number(2.5));
        assert_eq!(items[3], GraphValue::name("Foo"));
        assert_eq!(items[4], GraphValue::string(*b"hi"));
        assert_eq!(
            items[5],
            GraphValue::dict(vec![("K".into(), GraphValue::Number(7.0))])
        );
    }

    #[test]
    fn test_convert_stream() {
        let stream = lopdf::Stream::new(
            lopdf::dictionary! { "Length" => Object::Integer(4) },
            b"data".to_vec(),
        );
        let value = convert(&Object::Stream(stream));
        let GraphValue::Stream(inner) = value else {
            panic!("expected a stream");
        };
        assert_eq!(inner.dict[0].0, "Length");
        assert_eq!(inner.data, b"data");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = LopdfModel::parse(b"not a pdf at all").unwrap_err();
        assert!(matches!(err, Error::MalformedSource { .. }));
        assert!(!err.is_recoverable());
    }
}
