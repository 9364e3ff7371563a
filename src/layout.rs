//! Declarative description of a fixed-layout binary record.
//!
//! A layout is a plain value the caller builds (or deserializes, with the
//! `serde` feature) and compiles once via
//! [CompiledShape::try_from](crate::compiled::CompiledShape). The crate never
//! infers layouts from bytes.

/// Fixed-width scalar kinds a field can decode to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
}

impl ScalarKind {
    /// Width of the scalar in bytes.
    pub fn byte_size(self) -> usize {
        match self {
            ScalarKind::U8 | ScalarKind::I8 => 1,
            ScalarKind::U16 | ScalarKind::I16 => 2,
            ScalarKind::U32 | ScalarKind::I32 => 4,
            ScalarKind::U64 | ScalarKind::I64 => 8,
        }
    }

    /// Whether decoded values are sign-extended.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            ScalarKind::I8 | ScalarKind::I16 | ScalarKind::I32 | ScalarKind::I64
        )
    }

    /// Rust-syntax name of the scalar, e.g. `u16`.
    pub fn label(self) -> &'static str {
        match self {
            ScalarKind::U8 => "u8",
            ScalarKind::I8 => "i8",
            ScalarKind::U16 => "u16",
            ScalarKind::I16 => "i16",
            ScalarKind::U32 => "u32",
            ScalarKind::I32 => "i32",
            ScalarKind::U64 => "u64",
            ScalarKind::I64 => "i64",
        }
    }
}

/// Shape of a field: a scalar, a fixed-length array, or a nested record.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Single fixed-width value.
    Scalar(ScalarKind),
    /// Fixed-length homogeneous sequence of an element shape.
    Array { elem: Box<Shape>, len: usize },
    /// Nested record with named fields in declaration order.
    Record(Vec<FieldLayout>),
}

impl Shape {
    /// Convenience constructor for [Shape::Array].
    pub fn array(elem: Shape, len: usize) -> Self {
        Shape::Array {
            elem: Box::new(elem),
            len,
        }
    }

    /// Total byte size, computed from the static layout alone.
    pub fn byte_size(&self) -> usize {
        match self {
            Shape::Scalar(kind) => kind.byte_size(),
            Shape::Array { elem, len } => elem.byte_size() * len,
            Shape::Record(fields) => fields.iter().map(|f| f.shape.byte_size()).sum(),
        }
    }
}

/// A single named field in a record layout.
#[derive(Debug, Clone)]
pub struct FieldLayout {
    /// Name used in annotations and the decoded result map.
    pub name: String,
    /// Shape of the bytes this field occupies.
    pub shape: Shape,
}

impl FieldLayout {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        FieldLayout {
            name: name.into(),
            shape,
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::ScalarKindDef> for ScalarKind {
    fn from(value: crate::serde::ScalarKindDef) -> Self {
        use crate::serde::ScalarKindDef;
        match value {
            ScalarKindDef::U8 => ScalarKind::U8,
            ScalarKindDef::I8 => ScalarKind::I8,
            ScalarKindDef::U16 => ScalarKind::U16,
            ScalarKindDef::I16 => ScalarKind::I16,
            ScalarKindDef::U32 => ScalarKind::U32,
            ScalarKindDef::I32 => ScalarKind::I32,
            ScalarKindDef::U64 => ScalarKind::U64,
            ScalarKindDef::I64 => ScalarKind::I64,
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::ShapeDef> for Shape {
    fn from(value: crate::serde::ShapeDef) -> Self {
        use crate::serde::ShapeDef;
        match value {
            ShapeDef::Scalar { kind } => Shape::Scalar(kind.into()),
            ShapeDef::Array { elem, len } => Shape::Array {
                elem: Box::new((*elem).into()),
                len,
            },
            ShapeDef::Record { fields } => {
                Shape::Record(fields.into_iter().map(Into::into).collect())
            }
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldLayoutDef> for FieldLayout {
    fn from(value: crate::serde::FieldLayoutDef) -> Self {
        FieldLayout {
            name: value.name,
            shape: value.shape.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_byte_sizes() {
        assert_eq!(ScalarKind::U8.byte_size(), 1);
        assert_eq!(ScalarKind::I16.byte_size(), 2);
        assert_eq!(ScalarKind::U32.byte_size(), 4);
        assert_eq!(ScalarKind::I64.byte_size(), 8);
    }

    #[test]
    fn test_array_byte_size() {
        let shape = Shape::array(Shape::array(Shape::Scalar(ScalarKind::U8), 40), 6);
        assert_eq!(shape.byte_size(), 240);
    }

    #[test]
    fn test_record_byte_size() {
        let shape = Shape::Record(vec![
            FieldLayout::new("a", Shape::Scalar(ScalarKind::U16)),
            FieldLayout::new("b", Shape::array(Shape::Scalar(ScalarKind::U32), 3)),
        ]);
        assert_eq!(shape.byte_size(), 14);
    }
}
