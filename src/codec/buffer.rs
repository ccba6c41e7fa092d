//! Size/Buffer Utilities

use crate::error::Result;
use crate::record::Record;

/// Total ukuran fixed block `R` (jumlah lebar field wire)
#[inline]
pub fn wire_size<R: Record>() -> Result<usize> {
    Ok(R::meta()?.size)
}

/// Buffer nol sebesar fixed block `R`, untuk native call tanpa input scalar
pub fn new_zero_buffer<R: Record>() -> Result<Vec<u8>> {
    Ok(vec![0u8; wire_size::<R>()?])
}
