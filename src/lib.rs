//! # bytemark
//!
//! Reads fixed-layout binary records into typed values while annotating the
//! byte range, shape, and name of every field touched, then renders the
//! result as an annotated hex dump: raw bytes grouped by field, color coded
//! by byte class, with a description of each field on every line.
//!
//! Record layouts are declarative values supplied by the caller and compiled
//! once; the crate never infers a layout from the bytes, never validates
//! record semantics, and never writes records back out. One
//! [annotate::Annotator] drives one seekable byte source and accumulates
//! annotations across multiple `marshal` calls, which suits multi-record
//! streams such as tracker music files (song header, then track data, then
//! pattern data).
//!
//! ## Example
//!
//! ```
//! use std::io::Cursor;
//! use bytemark::annotate::Annotator;
//! use bytemark::compiled::CompiledShape;
//! use bytemark::dump::{Dumper, PlainStyle};
//! use bytemark::layout::{FieldLayout, ScalarKind, Shape};
//! use bytemark::value::Endian;
//!
//! let layout = Shape::Record(vec![
//!     FieldLayout::new("magic", Shape::array(Shape::Scalar(ScalarKind::U8), 4)),
//!     FieldLayout::new("count", Shape::Scalar(ScalarKind::U16)),
//! ]);
//! let compiled = CompiledShape::try_from(&layout).unwrap();
//!
//! let data = vec![b'T', b'F', b'M', b'X', 0x00, 0x45];
//! let mut annotator = Annotator::new(Endian::Big, Cursor::new(data));
//! annotator.marshal(&compiled, "hdr").unwrap();
//!
//! let report = annotator.dump(&Dumper::new(PlainStyle)).unwrap();
//! assert!(report.contains("hdr.count"));
//! assert!(report.contains("V: 0x0045 69"));
//! ```

pub mod annotate;
pub mod compiled;
pub mod cursor;
pub mod dump;
pub mod errors;
pub mod kind;
pub mod layout;
#[cfg(feature = "serde")]
pub mod serde;
pub mod store;
pub mod value;
