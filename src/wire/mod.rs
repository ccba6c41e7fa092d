//! Wire Layer: Fixed-Width Native Types
//!
//! Prinsip desain:
//! - Static registry: katalog wire type dibuat sekali, read-only selamanya
//! - Little-endian only: sesuai target Win64
//! - Unsafe terisolasi: dereference pointer hanya di `raw`

mod field;
mod raw;
mod registry;

pub use field::{AssignError, WireField};
pub use registry::{catalog, lookup, WireKind, WireType, SKIP_TAG};
pub(crate) use registry::WireValue;
