//! Codec Layer: Marshal / Unmarshal Fixed Blocks
//!
//! Alur pemakaian dengan native call (in/out buffer):
//!
//! ```text
//! record ──marshal──▶ [fixed block] ──native call──▶ [fixed block + ptrs]
//!                                                         │
//! record ◀──────────────────unmarshal─────────────────────┘
//! ```
//!
//! - `marshal`: scalar di-encode, pointer field selalu 0
//! - `unmarshal`: scalar di-decode, pointer field di-dereference (unsafe)
//! - `new_zero_buffer`: block kosong jika tidak ada parameter input

mod buffer;
mod decoder;
mod encoder;

pub use buffer::{new_zero_buffer, wire_size};
pub use decoder::{unmarshal, unmarshal_array, RecordReader};
pub use encoder::{marshal, marshal_into};
