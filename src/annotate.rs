//! The marshaling orchestrator: reads records and builds annotations.

use std::io::{Read, Seek};

use crate::{
    compiled::{CompiledField, CompiledShape},
    cursor::ByteCursor,
    dump::{Dumper, Style},
    errors::{MarshalError, ReadError},
    kind::{self, Kind},
    store::{Annotation, AnnotationStore},
    value::{Endian, Value, read_scalar},
};

/// Reads fixed-layout records from a seekable source, decoding them into
/// [Value]s while annotating the byte range of every field it touches.
///
/// One annotator owns one source and one [AnnotationStore]. Repeated
/// [marshal](Annotator::marshal) calls against the same stream accumulate
/// annotations at the cursor's advancing offset, which suits multi-record
/// streams (a header record, then trailing tables). The accumulated store is
/// replayed by [dump](Annotator::dump).
pub struct Annotator<R> {
    endian: Endian,
    cursor: ByteCursor<R>,
    store: AnnotationStore,
}

impl<R: Read + Seek> Annotator<R> {
    /// Creates an annotator over `source`. `endian` applies uniformly to every
    /// multi-byte scalar this annotator decodes.
    pub fn new(endian: Endian, source: R) -> Self {
        Annotator {
            endian,
            cursor: ByteCursor::new(source),
            store: AnnotationStore::new(),
        }
    }

    /// Byte order this annotator decodes with.
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Annotations recorded so far.
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// Store and cursor together, for replaying annotations against the bytes.
    pub fn parts_mut(&mut self) -> (&AnnotationStore, &mut ByteCursor<R>) {
        (&self.store, &mut self.cursor)
    }

    /// Renders the annotated dump of everything marshaled so far.
    pub fn dump<S: Style>(&mut self, dumper: &Dumper<S>) -> Result<String, ReadError> {
        dumper.render(&self.store, &mut self.cursor)
    }

    /// Reads one record (or bare array) at the cursor's current offset.
    ///
    /// The record's whole byte image is consumed in a single exact read and
    /// decoded with the annotator's byte order. One annotation is recorded per
    /// field, except arrays of arrays, which are flattened into one annotation
    /// per outer element named `prefix.Field[i]`. A bare array records a
    /// single annotation named with `prefix` verbatim; a bare scalar is
    /// rejected. On any failure nothing is committed to the store and the
    /// error is returned; on success the cursor sits just past the consumed
    /// bytes, ready for the next call.
    pub fn marshal(&mut self, shape: &CompiledShape, prefix: &str) -> Result<Value, MarshalError> {
        let base = self.cursor.offset()?;

        match shape {
            CompiledShape::Record { fields, size } => {
                let mut buf = vec![0u8; *size];
                self.cursor.read_exact(&mut buf)?;
                let value = shape.decode(&buf, self.endian)?;

                let mut pending = Vec::new();
                let mut offset = base;
                let mut pos = 0;
                for field in fields {
                    pos = self.annotate_field(field, prefix, &buf, pos, &mut offset, &mut pending)?;
                }
                // The running offset must match the bulk read byte for byte.
                if pos != *size {
                    return Err(MarshalError::Introspection(format!(
                        "annotated {pos} bytes of a {size}-byte record"
                    )));
                }

                for annotation in pending {
                    self.store.insert(annotation);
                }
                Ok(value)
            }
            CompiledShape::Array { .. } => {
                let size = shape.size();
                let mut buf = vec![0u8; size];
                self.cursor.read_exact(&mut buf)?;
                let value = shape.decode(&buf, self.endian)?;

                self.store.insert(Annotation {
                    start: base,
                    name: prefix.to_string(),
                    size,
                    kind_path: kind::kind_path(shape),
                    type_label: shape.type_label(),
                    value: None,
                });
                Ok(value)
            }
            CompiledShape::Scalar(_) => Err(MarshalError::UnsupportedShape(shape.type_label())),
        }
    }

    /// Annotates one record field starting at buffer position `pos`, pushing
    /// onto `pending` and advancing `offset`. Returns the position just past
    /// the field.
    fn annotate_field(
        &self,
        field: &CompiledField,
        prefix: &str,
        buf: &[u8],
        pos: usize,
        offset: &mut u64,
        pending: &mut Vec<Annotation>,
    ) -> Result<usize, MarshalError> {
        let path = kind::kind_path(&field.shape);
        let size = field.shape.size();
        let name = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{prefix}.{}", field.name)
        };

        if matches!(path.as_slice(), [Kind::Array, Kind::Array, ..]) {
            // Array of arrays: one annotation per outer element.
            let CompiledShape::Array { elem, len, .. } = &field.shape else {
                return Err(MarshalError::Introspection(format!(
                    "kind path of '{name}' opens with two arrays but its shape is {}",
                    field.shape.type_label()
                )));
            };

            let elem_size = elem.size();
            for i in 0..*len {
                pending.push(Annotation {
                    start: *offset,
                    name: format!("{name}[{i}]"),
                    size: elem_size,
                    kind_path: kind::kind_path(elem),
                    type_label: elem.type_label(),
                    value: None,
                });
                *offset += elem_size as u64;
            }
        } else {
            let value = match &field.shape {
                CompiledShape::Scalar(kind) => Some(read_scalar(*kind, &buf[pos..], self.endian)),
                _ => None,
            };

            pending.push(Annotation {
                start: *offset,
                name,
                size,
                kind_path: path,
                type_label: field.shape.type_label(),
                value,
            });
            *offset += size as u64;
        }

        Ok(pos + size)
    }
}
