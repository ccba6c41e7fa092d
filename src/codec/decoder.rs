//! Decoder (Unmarshal)
//!
//! Membaca fixed block front-to-back ke record. Field `LPWSTR` dan `LPBYTE`
//! berisi pointer ke memori native yang di-dereference saat decode, karena
//! itu semua entry point di sini `unsafe`.
//!
//! # Safety contract
//! Untuk setiap pointer non-null di dalam buffer:
//! - `LPWSTR` harus menunjuk ke string UTF-16 yang diakhiri code unit 0
//! - `LPBYTE` harus menunjuk ke minimal `count` byte yang readable
//!   (`count` dari sizing option)
//! - memori tersebut valid dan tidak bergerak selama pemanggilan decode
//!
//! Codec tidak bisa memverifikasi ini; pointer basi atau count salah adalah
//! kesalahan native call.

use tracing::{debug, trace};

use crate::error::{CodecError, Result};
use crate::record::{Record, RecordMeta};
use crate::wire::WireValue;

/// Decode satu fixed block dari awal `buffer` ke `target`.
///
/// Gagal dengan `BufferTooSmall` sebelum `target` disentuh jika buffer lebih
/// kecil dari fixed block. Error apa pun meninggalkan `target` tanpa
/// perubahan. Field skip dan field tanpa tag tidak disentuh,
/// begitu juga pointer field yang null.
///
/// # Safety
/// Lihat safety contract di dokumentasi modul.
pub unsafe fn unmarshal<R: Record>(buffer: &[u8], target: &mut R) -> Result<()> {
    let meta = R::meta()?;
    ensure_len(meta, buffer.len(), meta.size)?;
    read_fields(meta, &buffer[..meta.size], target)
}

/// Decode `count` record berurutan (tanpa jarak) dari `buffer`.
///
/// Record tanpa field wire tidak punya block, hasilnya selalu kosong
/// (sama seperti [`RecordReader`]).
///
/// # Safety
/// Lihat safety contract di dokumentasi modul.
pub unsafe fn unmarshal_array<R: Record + Default>(
    buffer: &[u8],
    count: usize,
) -> Result<Vec<R>> {
    let meta = R::meta()?;
    if meta.size == 0 {
        return Ok(Vec::new());
    }
    let required = meta.size.saturating_mul(count);
    ensure_len(meta, buffer.len(), required)?;

    // `count` sudah dibatasi panjang buffer
    let mut records = Vec::with_capacity(count);
    for block in buffer[..required].chunks_exact(meta.size) {
        let mut record = R::default();
        read_fields(meta, block, &mut record)?;
        records.push(record);
    }
    Ok(records)
}

/// Cursor untuk buffer yang berisi banyak fixed block berurutan.
///
/// Pola umum: native call mengisi `count * wire_size` byte sekaligus, lalu
/// record dibaca satu per satu.
pub struct RecordReader<'a> {
    buffer: &'a [u8],
    read_pos: usize,
}

impl<'a> RecordReader<'a> {
    /// Membuat reader dari buffer
    ///
    /// # Safety
    /// Seluruh `buffer` tunduk pada safety contract modul selama reader
    /// dipakai.
    #[inline(always)]
    pub unsafe fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            read_pos: 0,
        }
    }

    /// Decode record berikutnya.
    ///
    /// `None` jika buffer habis (atau `R` tidak punya field wire). Jika sisa
    /// buffer tidak cukup untuk satu block, returns `BufferTooSmall` dan
    /// cursor tidak bergerak.
    pub fn next_record<R: Record + Default>(&mut self) -> Option<Result<R>> {
        let mut record = R::default();
        match self.read_into(&mut record) {
            Ok(true) => Some(Ok(record)),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }

    /// Decode record berikutnya ke `target` yang sudah ada.
    ///
    /// Returns `false` jika buffer habis.
    pub fn read_into<R: Record>(&mut self, target: &mut R) -> Result<bool> {
        let meta = R::meta()?;
        if meta.size == 0 || self.remaining() == 0 {
            return Ok(false);
        }
        ensure_len(meta, self.remaining(), meta.size)?;

        let block = &self.buffer[self.read_pos..self.read_pos + meta.size];
        // SAFETY: kontrak buffer sudah dijamin pemanggil `RecordReader::new`
        unsafe { read_fields(meta, block, target)? };
        self.read_pos += meta.size;
        Ok(true)
    }

    /// Sisa byte yang belum dibaca
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }

    /// Posisi cursor saat ini
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.read_pos
    }
}

fn ensure_len<R>(meta: &RecordMeta<R>, actual: usize, required: usize) -> Result<()> {
    if actual < required {
        debug!(record = meta.name, required, actual, "buffer too small");
        return Err(CodecError::BufferTooSmall {
            record: meta.name,
            required,
            actual,
        });
    }
    Ok(())
}

/// `block.len()` harus == `meta.size`.
///
/// Dua tahap: semua slot di-decode dan dicek ke staging dulu, `target` baru
/// diubah setelah seluruh block lolos. Error apa pun berarti `target` utuh.
unsafe fn read_fields<R>(meta: &RecordMeta<R>, block: &[u8], target: &mut R) -> Result<()> {
    for fd in &meta.fields {
        fd.check_kind(meta.name, (fd.access.get)(target))?;
    }

    let mut staged: Vec<Option<WireValue>> = Vec::with_capacity(meta.fields.len());
    for fd in &meta.fields {
        let raw = &block[fd.offset..fd.offset + fd.wire.size];
        let count = meta.resolve_count(fd, &staged)?;
        let value = (fd.wire.decode)(raw, count);
        if let Some(value) = &value {
            value
                .check((fd.access.get)(target))
                .map_err(|e| fd.assign_error(meta.name, e))?;
        }
        staged.push(value);
    }

    for (fd, value) in meta.fields.iter().zip(staged) {
        let Some(value) = value else { continue };
        value
            .store((fd.access.get_mut)(target))
            .map_err(|e| fd.assign_error(meta.name, e))?;
        if fd.wire.kind.is_indirect() {
            trace!(record = meta.name, field = fd.name, "indirect field decoded");
        }
    }
    Ok(())
}
