//! Decoded values and byte-order selection.

use std::collections::BTreeMap;

use crate::layout::ScalarKind;

/// Byte order applied to every multi-byte scalar, fixed per reader instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

/// A decoded scalar, widened to 64 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarValue {
    Unsigned(u64),
    Signed(i64),
}

/// A value decoded from raw bytes according to a compiled shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(ScalarValue),
    Array(Vec<Value>),
    Record(BTreeMap<String, Value>),
}

/// Decodes one scalar from the front of `bytes`.
///
/// # Panics
///
/// Panics if `bytes` is shorter than `kind.byte_size()`; callers slice from
/// buffers whose length was already checked against the compiled layout.
pub fn read_scalar(kind: ScalarKind, bytes: &[u8], endian: Endian) -> ScalarValue {
    let width = kind.byte_size();
    let mut raw = 0u64;

    match endian {
        Endian::Big => {
            for &b in &bytes[..width] {
                raw = (raw << 8) | b as u64;
            }
        }
        Endian::Little => {
            for (i, &b) in bytes[..width].iter().enumerate() {
                raw |= (b as u64) << (8 * i);
            }
        }
    }

    if kind.is_signed() {
        ScalarValue::Signed(sign_extend(raw, width * 8))
    } else {
        ScalarValue::Unsigned(raw)
    }
}

/// Sign-extends the low `bits` of `raw` to a full `i64`.
fn sign_extend(raw: u64, bits: usize) -> i64 {
    let shift = 64 - bits;
    ((raw << shift) as i64) >> shift
}
