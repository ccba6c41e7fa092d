//! winstruct - Tag-Driven Native Record Codec
//!
//! Arsitektur:
//! - Wire registry: katalog statis tipe native (WORD, DWORD, LPWSTR, ...)
//! - Record meta: urutan field + ukuran fixed block dari tag per field
//! - Codec: marshal/unmarshal fixed block, dereference pointer field
//!
//! Byte order selalu little-endian dan pointer selalu 8 byte (Win64 ABI).
//!
//! ```
//! use winstruct::{marshal, unmarshal, win_struct};
//!
//! win_struct! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct PropertyValue {
//!         pub id: u32 => "DWORD",
//!         pub value: u32 => "DWORD",
//!         pub text: String => "LPWSTR",
//!     }
//! }
//!
//! let src = PropertyValue { id: 0x5007, value: 400, text: String::new() };
//! let bytes = marshal(&src).unwrap();
//! assert_eq!(bytes.len(), 16);
//!
//! let mut dst = PropertyValue::default();
//! // SAFETY: pointer field di `bytes` null (hasil marshal)
//! unsafe { unmarshal(&bytes, &mut dst) }.unwrap();
//! assert_eq!(dst, src);
//! ```

#[cfg(not(target_pointer_width = "64"))]
compile_error!("winstruct decodes 8-byte native pointers and requires a 64-bit target");

pub mod codec;
pub mod error;
pub mod record;
pub mod wire;

pub use codec::{
    marshal, marshal_into, new_zero_buffer, unmarshal, unmarshal_array, wire_size, RecordReader,
};
pub use error::{CodecError, Result};
pub use record::{describe, Access, FieldDef, FieldDescriptor, Record, RecordMeta, Sizing};
pub use wire::{catalog, lookup, AssignError, WireField, WireKind, WireType, SKIP_TAG};
