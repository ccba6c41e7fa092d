//! Error types untuk winstruct.
//!
//! Semua error di sini adalah programmer/configuration error (tag salah,
//! ukuran buffer tidak cocok dengan native call). Tidak ada yang perlu di-retry.

use thiserror::Error;

/// Error untuk semua operasi codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Tag menyebut wire type yang tidak ada di registry.
    #[error("unknown wire type `{name}` on {record}.{field}")]
    UnknownWireType {
        record: &'static str,
        field: &'static str,
        name: String,
    },

    /// Buffer lebih kecil dari fixed block record.
    #[error("{record} needs {required} bytes, buffer has {actual}")]
    BufferTooSmall {
        record: &'static str,
        required: usize,
        actual: usize,
    },

    /// Descriptor menyebut field yang tidak bisa diakses pada instance.
    #[error("field {record}.{field} is wired but has no accessor")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    /// Field tanpa tag (hanya dengan feature `strict-tags`).
    #[error("field {record}.{field} has no wire tag")]
    MissingTag {
        record: &'static str,
        field: &'static str,
    },

    /// Sizing option bukan literal dan bukan nama field sebelumnya.
    #[error("cannot resolve sizing option `{option}` for {record}.{field}")]
    UnresolvedSizingOption {
        record: &'static str,
        field: &'static str,
        option: String,
    },

    /// Tipe Rust field tidak bisa menampung wire type ini.
    #[error("field {record}.{field} cannot hold wire type {wire_type}")]
    IncompatibleField {
        record: &'static str,
        field: &'static str,
        wire_type: &'static str,
    },

    /// Nilai tidak muat. `width` (bytes) adalah tipe Rust field saat decode
    /// dan lebar wire type saat encode.
    #[error("value {value} does not fit {width} bytes of {record}.{field}")]
    ValueOverflow {
        record: &'static str,
        field: &'static str,
        value: i128,
        width: usize,
    },
}

/// Result type alias menggunakan CodecError.
pub type Result<T> = std::result::Result<T, CodecError>;
