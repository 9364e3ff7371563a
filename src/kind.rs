//! Shape classification: the chain of nested kinds down to the innermost scalar.

use crate::compiled::CompiledShape;
use crate::layout::ScalarKind;

/// One step in a kind path, outermost container first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Array,
    Record,
    Scalar(ScalarKind),
}

impl Kind {
    /// Display label, e.g. `array` or `u16`.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Array => "array",
            Kind::Record => "record",
            Kind::Scalar(kind) => kind.label(),
        }
    }
}

/// Computes the kind path of a shape.
///
/// Arrays recurse into their element shape only; elements are homogeneous and
/// statically known, so the element type stands for all of them. Records and
/// scalars terminate the path. The path only drives display decisions
/// (highlight cadence, flattening), never byte sizes.
pub fn kind_path(shape: &CompiledShape) -> Vec<Kind> {
    let mut path = Vec::new();
    push_kinds(shape, &mut path);
    path
}

fn push_kinds(shape: &CompiledShape, path: &mut Vec<Kind>) {
    match shape {
        CompiledShape::Scalar(kind) => path.push(Kind::Scalar(*kind)),
        CompiledShape::Array { elem, .. } => {
            path.push(Kind::Array);
            push_kinds(elem, path);
        }
        CompiledShape::Record { .. } => path.push(Kind::Record),
    }
}

/// Innermost scalar kind of a path, if the path ends in one.
pub fn innermost_scalar(path: &[Kind]) -> Option<ScalarKind> {
    match path.last() {
        Some(Kind::Scalar(kind)) => Some(*kind),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{FieldLayout, Shape};

    use super::*;

    fn compile(shape: &Shape) -> CompiledShape {
        CompiledShape::try_from(shape).unwrap()
    }

    #[test]
    fn test_kind_path_scalar() {
        let shape = compile(&Shape::Scalar(ScalarKind::U32));
        assert_eq!(kind_path(&shape), vec![Kind::Scalar(ScalarKind::U32)]);
    }

    #[test]
    fn test_kind_path_nested_array() {
        let shape = compile(&Shape::array(
            Shape::array(Shape::Scalar(ScalarKind::U16), 3),
            2,
        ));
        assert_eq!(
            kind_path(&shape),
            vec![Kind::Array, Kind::Array, Kind::Scalar(ScalarKind::U16)]
        );
    }

    #[test]
    fn test_kind_path_stops_at_record() {
        let shape = compile(&Shape::array(
            Shape::Record(vec![FieldLayout::new("a", Shape::Scalar(ScalarKind::U8))]),
            4,
        ));
        assert_eq!(kind_path(&shape), vec![Kind::Array, Kind::Record]);
    }

    #[test]
    fn test_innermost_scalar() {
        let path = vec![Kind::Array, Kind::Array, Kind::Scalar(ScalarKind::U16)];
        assert_eq!(innermost_scalar(&path), Some(ScalarKind::U16));
        assert_eq!(innermost_scalar(&[Kind::Array, Kind::Record]), None);
    }
}
