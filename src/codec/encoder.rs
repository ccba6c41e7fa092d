//! Encoder (Marshal)
//!
//! Menghasilkan fixed block dari nilai scalar record. Pointer field
//! (`LPWSTR`, `LPBYTE`) selalu ditulis sebagai 8 byte nol: dari sisi native
//! pointer field adalah output-only.

use tracing::debug;

use crate::error::{CodecError, Result};
use crate::record::{Record, RecordMeta};

/// Encode `source` ke buffer baru sebesar fixed block
pub fn marshal<R: Record>(source: &R) -> Result<Vec<u8>> {
    let meta = R::meta()?;
    let mut out = vec![0u8; meta.size];
    write_fields(meta, source, &mut out)?;
    Ok(out)
}

/// Encode `source` ke awal `out`.
///
/// Returns jumlah byte yang ditulis. Jika gagal di tengah jalan, isi `out`
/// tidak terdefinisi.
pub fn marshal_into<R: Record>(source: &R, out: &mut [u8]) -> Result<usize> {
    let meta = R::meta()?;
    if out.len() < meta.size {
        debug!(
            record = meta.name,
            required = meta.size,
            actual = out.len(),
            "output buffer too small"
        );
        return Err(CodecError::BufferTooSmall {
            record: meta.name,
            required: meta.size,
            actual: out.len(),
        });
    }
    write_fields(meta, source, &mut out[..meta.size])?;
    Ok(meta.size)
}

fn write_fields<R>(meta: &RecordMeta<R>, source: &R, out: &mut [u8]) -> Result<()> {
    for fd in &meta.fields {
        let slot = &mut out[fd.offset..fd.offset + fd.wire.size];
        let field = (fd.access.get)(source);
        fd.check_kind(meta.name, field)?;
        (fd.wire.encode)(field, slot).map_err(|e| fd.assign_error(meta.name, e))?;
    }
    Ok(())
}
