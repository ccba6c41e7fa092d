//! Jembatan antara wire value dan field Rust.
//!
//! Setiap tipe field yang boleh muncul di record (dengan tag selain `-`)
//! harus implement [`WireField`]. Codec hanya melihat field lewat trait ini.

use super::registry::WireKind;

/// Alasan sebuah nilai gagal disimpan ke / dibaca dari field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignError {
    /// Tipe Rust tidak cocok dengan kind wire type
    Incompatible,
    /// Nilai tidak muat di `width` byte tujuan (tipe field saat decode,
    /// wire type saat encode)
    Overflow { value: i128, width: usize },
}

/// Field record yang bisa dibaca/ditulis oleh codec.
///
/// Default setiap setter adalah [`AssignError::Incompatible`], jadi
/// implementor cukup override setter untuk kind miliknya.
pub trait WireField {
    /// Kind wire value yang ditampung tipe ini.
    fn kind(&self) -> WireKind;

    /// Nilai integer saat ini (untuk encode). Bisa negatif untuk tipe signed.
    fn as_int(&self) -> Option<i128> {
        None
    }

    /// Cek `value` muat di tipe ini tanpa mengubah field.
    fn check_uint(&self, _value: u64) -> Result<(), AssignError> {
        Err(AssignError::Incompatible)
    }

    fn set_uint(&mut self, _value: u64) -> Result<(), AssignError> {
        Err(AssignError::Incompatible)
    }

    fn as_float(&self) -> Option<f64> {
        None
    }

    fn set_float(&mut self, _value: f64) -> Result<(), AssignError> {
        Err(AssignError::Incompatible)
    }

    fn set_text(&mut self, _value: String) -> Result<(), AssignError> {
        Err(AssignError::Incompatible)
    }

    fn set_bytes(&mut self, _value: Vec<u8>) -> Result<(), AssignError> {
        Err(AssignError::Incompatible)
    }
}

#[inline]
fn overflow<T>(value: u64) -> AssignError {
    AssignError::Overflow {
        value: i128::from(value),
        width: std::mem::size_of::<T>(),
    }
}

macro_rules! impl_wire_field_int {
    ($($t:ty),*) => {
        $(
            impl WireField for $t {
                #[inline(always)]
                fn kind(&self) -> WireKind {
                    WireKind::Unsigned
                }

                #[inline(always)]
                fn as_int(&self) -> Option<i128> {
                    i128::try_from(*self).ok()
                }

                #[inline(always)]
                fn check_uint(&self, value: u64) -> Result<(), AssignError> {
                    <$t>::try_from(value).map(drop).map_err(|_| overflow::<$t>(value))
                }

                #[inline(always)]
                fn set_uint(&mut self, value: u64) -> Result<(), AssignError> {
                    *self = <$t>::try_from(value).map_err(|_| overflow::<$t>(value))?;
                    Ok(())
                }
            }
        )*
    };
}

// Signed: hanya 0..=MAX yang bisa dipetakan ke wire unsigned
impl_wire_field_int!(u8, u16, u32, u64, usize, i32, i64);

impl WireField for f64 {
    #[inline(always)]
    fn kind(&self) -> WireKind {
        WireKind::Float
    }

    #[inline(always)]
    fn as_float(&self) -> Option<f64> {
        Some(*self)
    }

    #[inline(always)]
    fn set_float(&mut self, value: f64) -> Result<(), AssignError> {
        *self = value;
        Ok(())
    }
}

impl WireField for String {
    fn kind(&self) -> WireKind {
        WireKind::WideString
    }

    fn set_text(&mut self, value: String) -> Result<(), AssignError> {
        *self = value;
        Ok(())
    }
}

impl WireField for Option<String> {
    fn kind(&self) -> WireKind {
        WireKind::WideString
    }

    fn set_text(&mut self, value: String) -> Result<(), AssignError> {
        *self = Some(value);
        Ok(())
    }
}

impl WireField for Vec<u8> {
    fn kind(&self) -> WireKind {
        WireKind::ByteBuffer
    }

    fn set_bytes(&mut self, value: Vec<u8>) -> Result<(), AssignError> {
        *self = value;
        Ok(())
    }
}

impl WireField for Option<Vec<u8>> {
    fn kind(&self) -> WireKind {
        WireKind::ByteBuffer
    }

    fn set_bytes(&mut self, value: Vec<u8>) -> Result<(), AssignError> {
        *self = Some(value);
        Ok(())
    }
}
