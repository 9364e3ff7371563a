//! Compiled layouts: validated shapes with resolved byte sizes, ready to decode.

use std::collections::BTreeMap;

use crate::{
    errors::{LayoutError, ReadError},
    layout::{ScalarKind, Shape},
    value::{Endian, Value, read_scalar},
};

/// A validated shape. Built once from a [Shape] via `TryFrom`, then reused
/// across any number of marshal calls.
#[derive(Debug, Clone)]
pub enum CompiledShape {
    Scalar(ScalarKind),
    Array {
        elem: Box<CompiledShape>,
        len: usize,
        size: usize,
    },
    Record {
        fields: Vec<CompiledField>,
        size: usize,
    },
}

/// A validated record field.
#[derive(Debug, Clone)]
pub struct CompiledField {
    /// Name from the layout, used for annotation paths and the result map.
    pub name: String,
    pub shape: CompiledShape,
}

impl TryFrom<&Shape> for CompiledShape {
    type Error = LayoutError;

    fn try_from(shape: &Shape) -> Result<Self, LayoutError> {
        match shape {
            Shape::Scalar(kind) => Ok(CompiledShape::Scalar(*kind)),
            Shape::Array { elem, len } => {
                if *len == 0 {
                    return Err(LayoutError::InvalidArrayLen);
                }
                let elem = CompiledShape::try_from(elem.as_ref())?;
                let size = elem.size() * len;
                Ok(CompiledShape::Array {
                    elem: Box::new(elem),
                    len: *len,
                    size,
                })
            }
            Shape::Record(field_layouts) => {
                if field_layouts.is_empty() {
                    return Err(LayoutError::EmptyRecord);
                }

                let mut fields: Vec<CompiledField> = Vec::with_capacity(field_layouts.len());
                let mut size = 0;

                for layout in field_layouts {
                    if layout.name.is_empty() || fields.iter().any(|f| f.name == layout.name) {
                        return Err(LayoutError::InvalidFieldName);
                    }

                    let shape = CompiledShape::try_from(&layout.shape)?;
                    size += shape.size();
                    fields.push(CompiledField {
                        name: layout.name.clone(),
                        shape,
                    });
                }

                Ok(CompiledShape::Record { fields, size })
            }
        }
    }
}

impl CompiledShape {
    /// Total byte size of the shape.
    pub fn size(&self) -> usize {
        match self {
            CompiledShape::Scalar(kind) => kind.byte_size(),
            CompiledShape::Array { size, .. } | CompiledShape::Record { size, .. } => *size,
        }
    }

    /// Rust-syntax display label, e.g. `u16` or `[[u8; 40]; 6]`.
    pub fn type_label(&self) -> String {
        match self {
            CompiledShape::Scalar(kind) => kind.label().to_string(),
            CompiledShape::Array { elem, len, .. } => {
                format!("[{}; {}]", elem.type_label(), len)
            }
            CompiledShape::Record { .. } => "record".to_string(),
        }
    }

    /// Decodes the first [size](CompiledShape::size) bytes of `data`.
    ///
    /// Every multi-byte scalar is read with the given byte order. Fails if
    /// `data` is shorter than the shape.
    pub fn decode(&self, data: &[u8], endian: Endian) -> Result<Value, ReadError> {
        if data.len() < self.size() {
            return Err(ReadError::UnexpectedEof);
        }
        Ok(self.decode_unchecked(data, endian))
    }

    fn decode_unchecked(&self, data: &[u8], endian: Endian) -> Value {
        match self {
            CompiledShape::Scalar(kind) => Value::Scalar(read_scalar(*kind, data, endian)),
            CompiledShape::Array { elem, len, .. } => {
                let stride = elem.size();
                let mut values = Vec::with_capacity(*len);
                for i in 0..*len {
                    values.push(elem.decode_unchecked(&data[i * stride..], endian));
                }
                Value::Array(values)
            }
            CompiledShape::Record { fields, .. } => {
                let mut map = BTreeMap::new();
                let mut pos = 0;
                for field in fields {
                    map.insert(
                        field.name.clone(),
                        field.shape.decode_unchecked(&data[pos..], endian),
                    );
                    pos += field.shape.size();
                }
                Value::Record(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::FieldLayout;
    use crate::value::ScalarValue;

    use super::*;

    #[test]
    fn test_compile_resolves_sizes() {
        let shape = Shape::Record(vec![
            FieldLayout::new("header", Shape::array(Shape::Scalar(ScalarKind::U8), 10)),
            FieldLayout::new("count", Shape::Scalar(ScalarKind::U16)),
            FieldLayout::new(
                "text",
                Shape::array(Shape::array(Shape::Scalar(ScalarKind::U8), 40), 6),
            ),
        ]);
        let compiled = CompiledShape::try_from(&shape).unwrap();
        assert_eq!(compiled.size(), 252);
    }

    #[test]
    fn test_compile_rejects_zero_length_array() {
        let shape = Shape::array(Shape::Scalar(ScalarKind::U8), 0);
        assert_eq!(
            CompiledShape::try_from(&shape).unwrap_err(),
            LayoutError::InvalidArrayLen
        );
    }

    #[test]
    fn test_compile_rejects_empty_record() {
        let shape = Shape::Record(vec![]);
        assert_eq!(
            CompiledShape::try_from(&shape).unwrap_err(),
            LayoutError::EmptyRecord
        );
    }

    #[test]
    fn test_compile_rejects_duplicate_field_name() {
        let shape = Shape::Record(vec![
            FieldLayout::new("a", Shape::Scalar(ScalarKind::U8)),
            FieldLayout::new("a", Shape::Scalar(ScalarKind::U16)),
        ]);
        assert_eq!(
            CompiledShape::try_from(&shape).unwrap_err(),
            LayoutError::InvalidFieldName
        );
    }

    #[test]
    fn test_compile_rejects_empty_field_name() {
        let shape = Shape::Record(vec![FieldLayout::new("", Shape::Scalar(ScalarKind::U8))]);
        assert_eq!(
            CompiledShape::try_from(&shape).unwrap_err(),
            LayoutError::InvalidFieldName
        );
    }

    #[test]
    fn test_type_labels() {
        let shape = Shape::array(Shape::array(Shape::Scalar(ScalarKind::U8), 40), 6);
        let compiled = CompiledShape::try_from(&shape).unwrap();
        assert_eq!(compiled.type_label(), "[[u8; 40]; 6]");

        let scalar = CompiledShape::try_from(&Shape::Scalar(ScalarKind::I32)).unwrap();
        assert_eq!(scalar.type_label(), "i32");
    }

    #[test]
    fn test_decode_record() {
        let shape = Shape::Record(vec![
            FieldLayout::new("id", Shape::Scalar(ScalarKind::U16)),
            FieldLayout::new("values", Shape::array(Shape::Scalar(ScalarKind::U8), 2)),
        ]);
        let compiled = CompiledShape::try_from(&shape).unwrap();
        let value = compiled.decode(&[0x01, 0x02, 0x03, 0x04], Endian::Big).unwrap();

        assert_eq!(
            value,
            Value::Record(BTreeMap::from([
                ("id".to_string(), Value::Scalar(ScalarValue::Unsigned(0x0102))),
                (
                    "values".to_string(),
                    Value::Array(vec![
                        Value::Scalar(ScalarValue::Unsigned(3)),
                        Value::Scalar(ScalarValue::Unsigned(4)),
                    ])
                ),
            ]))
        );
    }

    #[test]
    fn test_decode_little_endian() {
        let compiled = CompiledShape::try_from(&Shape::Scalar(ScalarKind::U32)).unwrap();
        let value = compiled.decode(&[0x78, 0x56, 0x34, 0x12], Endian::Little).unwrap();
        assert_eq!(value, Value::Scalar(ScalarValue::Unsigned(0x1234_5678)));
    }

    #[test]
    fn test_decode_short_data() {
        let compiled = CompiledShape::try_from(&Shape::Scalar(ScalarKind::U32)).unwrap();
        assert_eq!(
            compiled.decode(&[0x01, 0x02], Endian::Big).unwrap_err(),
            ReadError::UnexpectedEof
        );
    }
}
