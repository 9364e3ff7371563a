//! Error types for layout compilation, byte reading, and marshaling.

/// Errors produced when compiling a [crate::layout::Shape] into a [crate::compiled::CompiledShape].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Record has no fields.
    EmptyRecord,
    /// Array length is zero.
    InvalidArrayLen,
    /// Field name is empty or duplicates another field in the same record.
    InvalidFieldName,
}

/// Errors produced when seeking or reading the underlying byte source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// The source ended before the requested number of bytes could be read.
    UnexpectedEof,
    /// Any other I/O failure, identified by its [std::io::ErrorKind].
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for ReadError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ReadError::UnexpectedEof,
            kind => ReadError::Io(kind),
        }
    }
}

/// Errors produced by [crate::annotate::Annotator::marshal].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarshalError {
    /// The underlying byte source failed.
    Read(ReadError),
    /// Top-level shape is neither a record nor an array; carries the rejected shape's label.
    UnsupportedShape(String),
    /// A field's shape did not line up with its kind path or byte accounting.
    Introspection(String),
}

impl From<ReadError> for MarshalError {
    fn from(err: ReadError) -> Self {
        MarshalError::Read(err)
    }
}
