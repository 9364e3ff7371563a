//! Annotated hex dump rendering: fixed-width hex/ASCII rows with per-field
//! color bands and trailing field metadata.
//!
//! How a [Color] turns into escape sequences is not this crate's business;
//! the renderer paints everything through the [Style] capability. The bundled
//! [PlainStyle] applies no decoration at all, which also makes the output
//! directly assertable in tests. Callers that want terminal colors implement
//! [Style] over their escape library of choice.

use std::collections::HashMap;
use std::io::{Read, Seek};

use crate::{
    cursor::ByteCursor,
    errors::ReadError,
    kind::{Kind, innermost_scalar},
    store::{Annotation, AnnotationStore},
    value::ScalarValue,
};

const BYTES_PER_ROW: usize = 16;

/// Abstract palette colors used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Magenta,
    Green,
    Blue,
    Yellow,
    Red,
    White,
}

/// Style capability the renderer paints through.
pub trait Style {
    /// Wraps `text` in the given color, optionally underlined.
    fn paint(&self, text: &str, color: Color, underline: bool) -> String;
    /// Wraps `text` in a bold face.
    fn bold(&self, text: &str) -> String;
}

/// Style that applies no decoration; rows come out as plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainStyle;

impl Style for PlainStyle {
    fn paint(&self, text: &str, _color: Color, _underline: bool) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Byte-to-color classification table. Bytes without an entry render
/// [Color::White].
#[derive(Debug, Clone)]
pub struct ByteColors {
    colors: HashMap<u8, Color>,
}

impl ByteColors {
    /// Table with no entries: every byte renders the default color.
    pub fn empty() -> Self {
        ByteColors {
            colors: HashMap::new(),
        }
    }

    /// Sets the color for one byte value.
    pub fn set(&mut self, byte: u8, color: Color) -> &mut Self {
        self.colors.insert(byte, color);
        self
    }

    /// Color for `byte`, falling back to [Color::White].
    pub fn color_of(&self, byte: u8) -> Color {
        self.colors.get(&byte).copied().unwrap_or(Color::White)
    }
}

impl Default for ByteColors {
    /// Distinguishes letters (green), digits (cyan), whitespace (yellow), and
    /// non-printable bytes (blue). Other printable bytes fall through to the
    /// default color.
    fn default() -> Self {
        let mut table = ByteColors::empty();
        for byte in 0..=255u8 {
            match byte {
                b'a'..=b'z' | b'A'..=b'Z' => table.set(byte, Color::Green),
                b'0'..=b'9' => table.set(byte, Color::Cyan),
                b' ' | b'\t' | b'\r' | b'\n' => table.set(byte, Color::Yellow),
                0x00..=0x1f | 0x7f..=0xff => table.set(byte, Color::Blue),
                _ => continue,
            };
        }
        table
    }
}

/// Renders [AnnotationStore] entries against their original bytes.
///
/// Each field gets one perimeter color from a rotating five-color palette, so
/// consecutive fields are visually distinguishable; individual bytes are
/// colored by the [ByteColors] table, and bytes on the natural alignment
/// boundary of the field's innermost scalar are additionally underlined.
pub struct Dumper<S> {
    style: S,
    byte_colors: ByteColors,
    palette: [Color; 5],
}

impl<S: Style> Dumper<S> {
    /// Dumper with the default byte table and perimeter palette.
    pub fn new(style: S) -> Self {
        Dumper {
            style,
            byte_colors: ByteColors::default(),
            palette: [
                Color::Cyan,
                Color::Magenta,
                Color::Green,
                Color::Blue,
                Color::Yellow,
            ],
        }
    }

    /// Replaces the byte-to-color classification table.
    pub fn set_byte_colors(&mut self, byte_colors: ByteColors) -> &mut Self {
        self.byte_colors = byte_colors;
        self
    }

    /// Replaces the five-color field perimeter palette.
    pub fn set_palette(&mut self, palette: [Color; 5]) -> &mut Self {
        self.palette = palette;
        self
    }

    /// Replays `store` in ascending start order, re-reading each field's bytes
    /// from `cursor` and formatting them as 16-byte rows.
    pub fn render<R: Read + Seek>(
        &self,
        store: &AnnotationStore,
        cursor: &mut ByteCursor<R>,
    ) -> Result<String, ReadError> {
        let mut out = String::new();

        for (index, annotation) in store.iter().enumerate() {
            let perimeter = self.palette[index % self.palette.len()];

            cursor.seek_to(annotation.start)?;
            let mut bytes = vec![0u8; annotation.size];
            cursor.read_exact(&mut bytes)?;

            self.render_field(&mut out, annotation, &bytes, perimeter);
        }

        Ok(out)
    }

    fn render_field(
        &self,
        out: &mut String,
        annotation: &Annotation,
        bytes: &[u8],
        perimeter: Color,
    ) {
        let cadence = highlight_cadence(&annotation.kind_path);

        for row_start in (0..annotation.size).step_by(BYTES_PER_ROW) {
            let row_end = (row_start + BYTES_PER_ROW).min(annotation.size);
            let row = &bytes[row_start..row_end];

            let offset = format!("{:08x}", annotation.start + row_start as u64);
            out.push_str(&self.style.paint(&offset, perimeter, false));
            out.push_str("  ");

            for (i, &byte) in row.iter().enumerate() {
                let underline = cadence.is_some_and(|n| i % n == 0);
                let hex = format!("{byte:02x}");
                out.push_str(&self.style.paint(&hex, self.byte_colors.color_of(byte), underline));
                out.push(' ');
                if i == 7 {
                    // extra space between byte 8 and 9 for readability
                    out.push(' ');
                }
            }

            // Pad short rows so the ASCII panel and metadata stay aligned.
            let missing = BYTES_PER_ROW - row.len();
            if missing > 8 {
                out.push(' ');
            }
            for _ in 0..missing {
                out.push_str("   ");
            }

            out.push(' ');
            out.push_str(&self.style.bold("|"));
            for (i, &byte) in row.iter().enumerate() {
                let underline = cadence.is_some_and(|n| i % n == 0);
                let shown = if (0x20..=0x7e).contains(&byte) {
                    byte as char
                } else {
                    '.'
                };
                out.push_str(&self.style.paint(
                    &shown.to_string(),
                    self.byte_colors.color_of(byte),
                    underline,
                ));
            }
            out.push_str(&self.style.bold("|"));
            out.push(' ');
            for _ in 0..missing {
                out.push(' ');
            }

            // Field metadata, repeated on every row the field spans.
            out.push_str(&self.style.paint(&annotation.type_label, perimeter, false));
            out.push(' ');
            out.push_str(&self.style.paint(&annotation.name, perimeter, false));
            out.push_str(": ");
            out.push_str(&format!("L: 0x{size:02X} {size} ", size = annotation.size));
            if let Some(value) = annotation.value {
                out.push_str(&format_value(value, &annotation.kind_path));
            }
            out.push('\n');
        }
    }
}

/// Underline every Nth byte of a row when the innermost scalar spans N bytes,
/// marking the natural alignment boundaries inside multi-element arrays.
fn highlight_cadence(path: &[Kind]) -> Option<usize> {
    match innermost_scalar(path)?.byte_size() {
        width @ (2 | 4 | 8) => Some(width),
        _ => None,
    }
}

/// `V: 0x<hex> <dec>` with a minimum hex width of two digits per byte.
fn format_value(value: ScalarValue, path: &[Kind]) -> String {
    let width = innermost_scalar(path)
        .map(|kind| kind.byte_size() * 2)
        .unwrap_or(2);

    match value {
        ScalarValue::Unsigned(v) => format!("V: 0x{v:0width$x} {v}"),
        ScalarValue::Signed(v) => format!("V: 0x{v:0width$x} {v}"),
    }
}
