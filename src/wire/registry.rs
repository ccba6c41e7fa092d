//! Wire Type Registry
//!
//! Katalog tetap: nama wire type → lebar, kind, dan fungsi encode/decode.
//!
//! ```text
//! ┌─────────┬───────┬────────────┐
//! │ Name    │ Bytes │ Kind       │
//! ├─────────┼───────┼────────────┤
//! │ WORD    │ 2     │ Unsigned   │
//! │ DWORD   │ 4     │ Unsigned   │
//! │ DWORD32 │ 4     │ Unsigned   │
//! │ DWORD64 │ 8     │ Unsigned   │
//! │ QWORD   │ 8     │ Unsigned   │
//! │ double  │ 8     │ Float      │
//! │ LPWSTR  │ 8     │ WideString │
//! │ LPBYTE  │ 8     │ ByteBuffer │
//! └─────────┴───────┴────────────┘
//! ```

use std::fmt;

use super::field::{AssignError, WireField};
use super::raw;

/// Tag sentinel: field tidak ada di wire
pub const SKIP_TAG: &str = "-";

/// Lebar pointer native (Win64)
const POINTER_SIZE: usize = 8;

/// Kategori wire value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    /// Unsigned integer little-endian
    Unsigned,
    /// IEEE-754 binary64
    Float,
    /// Pointer ke string UTF-16 null-terminated
    WideString,
    /// Pointer ke byte buffer dengan panjang dari sizing option
    ByteBuffer,
}

impl WireKind {
    /// Nilai dibaca lewat pointer, bukan dari fixed block
    #[inline(always)]
    pub fn is_indirect(self) -> bool {
        matches!(self, Self::WideString | Self::ByteBuffer)
    }
}

/// Nilai satu slot yang sudah di-decode, belum disimpan ke field
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum WireValue {
    Uint(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl WireValue {
    /// Cek nilai muat di `field` tanpa mengubahnya. Kind sudah dicek terpisah.
    pub(crate) fn check(&self, field: &dyn WireField) -> Result<(), AssignError> {
        match self {
            Self::Uint(value) => field.check_uint(*value),
            _ => Ok(()),
        }
    }

    pub(crate) fn store(self, field: &mut dyn WireField) -> Result<(), AssignError> {
        match self {
            Self::Uint(value) => field.set_uint(value),
            Self::Float(value) => field.set_float(value),
            Self::Text(value) => field.set_text(value),
            Self::Bytes(value) => field.set_bytes(value),
        }
    }
}

/// Decode: slot fixed block + byte count (hanya ByteBuffer) → nilai.
/// `None` = pointer null atau count 0, field tidak disentuh.
pub(crate) type DecodeFn = unsafe fn(raw: &[u8], count: usize) -> Option<WireValue>;

/// Encode: field → slot fixed block (`out.len()` == lebar wire type)
pub(crate) type EncodeFn = fn(field: &dyn WireField, out: &mut [u8]) -> Result<(), AssignError>;

/// Descriptor wire type, immutable selama proses hidup
pub struct WireType {
    pub name: &'static str,
    pub size: usize,
    pub kind: WireKind,
    pub(crate) decode: DecodeFn,
    pub(crate) encode: EncodeFn,
}

impl fmt::Debug for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireType")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("kind", &self.kind)
            .finish()
    }
}

static WIRE_TYPES: [WireType; 8] = [
    WireType {
        name: "WORD",
        size: 2,
        kind: WireKind::Unsigned,
        decode: decode_uint,
        encode: encode_uint,
    },
    WireType {
        name: "DWORD",
        size: 4,
        kind: WireKind::Unsigned,
        decode: decode_uint,
        encode: encode_uint,
    },
    WireType {
        name: "DWORD32",
        size: 4,
        kind: WireKind::Unsigned,
        decode: decode_uint,
        encode: encode_uint,
    },
    WireType {
        name: "DWORD64",
        size: 8,
        kind: WireKind::Unsigned,
        decode: decode_uint,
        encode: encode_uint,
    },
    WireType {
        name: "QWORD",
        size: 8,
        kind: WireKind::Unsigned,
        decode: decode_uint,
        encode: encode_uint,
    },
    WireType {
        name: "double",
        size: 8,
        kind: WireKind::Float,
        decode: decode_float,
        encode: encode_float,
    },
    WireType {
        name: "LPWSTR",
        size: POINTER_SIZE,
        kind: WireKind::WideString,
        decode: decode_wide_string,
        encode: encode_null_pointer,
    },
    WireType {
        name: "LPBYTE",
        size: POINTER_SIZE,
        kind: WireKind::ByteBuffer,
        decode: decode_byte_buffer,
        encode: encode_null_pointer,
    },
];

/// Cari wire type berdasarkan nama (case-sensitive, exact match)
pub fn lookup(name: &str) -> Option<&'static WireType> {
    WIRE_TYPES.iter().find(|wt| wt.name == name)
}

/// Seluruh katalog, urut sesuai deklarasi
pub fn catalog() -> &'static [WireType] {
    &WIRE_TYPES
}

unsafe fn decode_uint(raw: &[u8], _count: usize) -> Option<WireValue> {
    Some(WireValue::Uint(raw::read_uint(raw)))
}

fn encode_uint(field: &dyn WireField, out: &mut [u8]) -> Result<(), AssignError> {
    let wide = field.as_int().ok_or(AssignError::Incompatible)?;
    let width = out.len();
    match u64::try_from(wide) {
        Ok(value) if width >= 8 || value >> (width * 8) == 0 => {
            raw::write_uint(value, out);
            Ok(())
        }
        _ => Err(AssignError::Overflow { value: wide, width }),
    }
}

unsafe fn decode_float(raw: &[u8], _count: usize) -> Option<WireValue> {
    Some(WireValue::Float(f64::from_bits(raw::read_uint(raw))))
}

fn encode_float(field: &dyn WireField, out: &mut [u8]) -> Result<(), AssignError> {
    let value = field.as_float().ok_or(AssignError::Incompatible)?;
    raw::write_uint(value.to_bits(), out);
    Ok(())
}

unsafe fn decode_wide_string(raw: &[u8], _count: usize) -> Option<WireValue> {
    let ptr = raw::read_ptr(raw);
    if ptr == 0 {
        return None;
    }
    Some(WireValue::Text(raw::read_wide_string(ptr)))
}

/// Null pointer atau count 0: tidak ada dereference
unsafe fn decode_byte_buffer(raw: &[u8], count: usize) -> Option<WireValue> {
    let ptr = raw::read_ptr(raw);
    if ptr == 0 || count == 0 {
        return None;
    }
    Some(WireValue::Bytes(raw::read_bytes(ptr, count)))
}

/// Pointer field selalu output-only dari sisi native
fn encode_null_pointer(_field: &dyn WireField, out: &mut [u8]) -> Result<(), AssignError> {
    out.fill(0);
    Ok(())
}
