//! Record Layer: Tag-Driven Field Descriptors
//!
//! Record dideklarasikan lewat [`win_struct!`](crate::win_struct), yang
//! menghasilkan tabel [`FieldDef`] (nama, tag, accessor) per tipe.
//! [`describe`] mengubah tabel itu menjadi [`RecordMeta`]: urutan field wire
//! dan total ukuran fixed block.
//!
//! Urutan deklarasi = urutan wire. Tidak ada alignment otomatis; padding
//! harus dideklarasikan sebagai field biasa (mis. `DWORD`).

mod descriptor;
mod macros;

pub use descriptor::{describe, Access, FieldDef, FieldDescriptor, RecordMeta, Sizing};

use crate::error::Result;

/// Tipe yang punya layout wire.
///
/// Jangan implement manual kecuali perlu; gunakan `win_struct!`.
pub trait Record: Sized + 'static {
    /// Nama tipe untuk pesan error dan log
    const NAME: &'static str;

    /// Semua field yang dideklarasikan, urut sesuai deklarasi
    const FIELDS: &'static [FieldDef<Self>];

    /// Meta ter-cache untuk tipe ini (dibangun sekali via [`describe`])
    fn meta() -> Result<&'static RecordMeta<Self>>;
}
