//! JSON-deserializable layout descriptions and annotation export.
//!
//! The `*Def` types mirror the core layout types one-to-one so that record
//! layouts can ship as JSON files next to the binaries they describe, and
//! [AnnotationExport] is a flat image of an annotation for tooling that wants
//! the metadata without the visual dump.

use serde::{Deserialize, Serialize};

use crate::value::ScalarValue;

/// Fixed-width scalar kinds.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
pub enum ScalarKindDef {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
}

/// Shape of a field in a layout file.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "type")]
pub enum ShapeDef {
    /// Single scalar value.
    Scalar { kind: ScalarKindDef },
    /// Fixed-length array of an element shape.
    Array { elem: Box<ShapeDef>, len: usize },
    /// Nested record with named fields in declaration order.
    Record { fields: Vec<FieldLayoutDef> },
}

/// One named field of a record layout.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldLayoutDef {
    /// Human-readable field name; becomes the annotation path segment.
    pub name: String,
    /// Shape of the bytes this field occupies.
    pub shape: ShapeDef,
}

/// A decoded scalar in export form.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum ScalarValueDef {
    Unsigned(u64),
    Signed(i64),
}

impl From<ScalarValue> for ScalarValueDef {
    fn from(value: ScalarValue) -> Self {
        match value {
            ScalarValue::Unsigned(v) => ScalarValueDef::Unsigned(v),
            ScalarValue::Signed(v) => ScalarValueDef::Signed(v),
        }
    }
}

/// Flat, serializable image of one [crate::store::Annotation].
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct AnnotationExport {
    /// Absolute byte offset where the field begins.
    pub start: u64,
    /// Dotted path name.
    pub name: String,
    /// Byte length consumed.
    pub size: usize,
    /// Kind path as display labels, outermost first, e.g. `["array", "u16"]`.
    pub kind_path: Vec<String>,
    /// Display label of the declared shape.
    pub type_label: String,
    /// Decoded scalar, if the field had one.
    pub value: Option<ScalarValueDef>,
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::annotate::Annotator;
    use crate::compiled::CompiledShape;
    use crate::layout::Shape;
    use crate::value::Endian;

    use super::*;

    #[test]
    fn test_layout_from_json() {
        let json = r#"{
            "type": "Record",
            "fields": [
                { "name": "magic", "shape": { "type": "Array", "elem": { "type": "Scalar", "kind": "U8" }, "len": 4 } },
                { "name": "count", "shape": { "type": "Scalar", "kind": "U16" } }
            ]
        }"#;

        let def: ShapeDef = serde_json::from_str(json).unwrap();
        let shape = Shape::from(def);
        assert_eq!(shape.byte_size(), 6);

        let compiled = CompiledShape::try_from(&shape).unwrap();
        assert_eq!(compiled.type_label(), "record");
    }

    #[test]
    fn test_export_annotations() {
        let json = r#"{
            "type": "Record",
            "fields": [{ "name": "count", "shape": { "type": "Scalar", "kind": "U16" } }]
        }"#;
        let def: ShapeDef = serde_json::from_str(json).unwrap();
        let compiled = CompiledShape::try_from(&Shape::from(def)).unwrap();

        let mut annotator = Annotator::new(Endian::Big, Cursor::new(vec![0x00, 0x45]));
        annotator.marshal(&compiled, "hdr").unwrap();

        let exported = annotator.store().export();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].name, "hdr.count");
        assert_eq!(exported[0].kind_path, vec!["u16".to_string()]);
        assert_eq!(exported[0].value, Some(ScalarValueDef::Unsigned(69)));

        let json = serde_json::to_string(&exported).unwrap();
        assert!(json.contains("\"hdr.count\""), "{json}");
    }
}
