//! Raw byte/pointer primitives.
//!
//! Semua raw-pointer arithmetic codec ada di file ini. Di luar modul ini
//! codec hanya melihat data owned (`String`, `Vec<u8>`) yang sudah di-copy.

/// Baca unsigned little-endian dengan lebar `raw.len()` (maks 8 bytes)
#[inline(always)]
pub(crate) fn read_uint(raw: &[u8]) -> u64 {
    raw.iter()
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)))
}

/// Tulis unsigned little-endian ke seluruh `out`
#[inline(always)]
pub(crate) fn write_uint(mut value: u64, out: &mut [u8]) {
    for b in out.iter_mut() {
        *b = (value & 0xff) as u8;
        value >>= 8;
    }
}

/// Pointer 8-byte dari fixed block
#[inline(always)]
pub(crate) fn read_ptr(raw: &[u8]) -> usize {
    read_uint(raw) as usize
}

/// Baca string UTF-16 null-terminated dari memori native.
///
/// Unpaired surrogate diganti U+FFFD.
///
/// # Safety
/// `ptr` harus non-null dan menunjuk ke deretan code unit 2-byte yang
/// diakhiri 0, valid selama pemanggilan ini.
pub(crate) unsafe fn read_wide_string(ptr: usize) -> String {
    let base = ptr as *const u16;

    let mut len = 0usize;
    // SAFETY: caller menjamin terminator 0 ada sebelum akhir region valid
    while base.add(len).read_unaligned() != 0 {
        len += 1;
    }

    let units: Vec<u16> = (0..len).map(|i| base.add(i).read_unaligned()).collect();
    String::from_utf16_lossy(&units)
}

/// Copy `count` bytes dari memori native ke buffer owned.
///
/// # Safety
/// `ptr` harus non-null dan `count` bytes mulai dari `ptr` harus readable.
pub(crate) unsafe fn read_bytes(ptr: usize, count: usize) -> Vec<u8> {
    // SAFETY: caller menjamin region [ptr, ptr + count) valid
    std::slice::from_raw_parts(ptr as *const u8, count).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uint_little_endian() {
        let mut buf = [0u8; 4];
        write_uint(0x1234_5678, &mut buf);
        assert_eq!(buf, [0x78, 0x56, 0x34, 0x12]);
        assert_eq!(read_uint(&buf), 0x1234_5678);
    }

    #[test]
    fn test_write_uint_truncates_to_slice() {
        let mut buf = [0u8; 2];
        write_uint(0xAABB_CCDD, &mut buf);
        assert_eq!(buf, [0xDD, 0xCC]);
    }

    #[test]
    fn test_wide_string_stops_at_terminator() {
        let units: Vec<u16> = "Alpha\0Beta\0".encode_utf16().collect();
        let s = unsafe { read_wide_string(units.as_ptr() as usize) };
        assert_eq!(s, "Alpha");
    }

    #[test]
    fn test_wide_string_empty() {
        let units = [0u16];
        let s = unsafe { read_wide_string(units.as_ptr() as usize) };
        assert!(s.is_empty());
    }

    #[test]
    fn test_read_bytes_exact_count() {
        let data = [9u8, 8, 7, 6, 5, 4];
        let copied = unsafe { read_bytes(data.as_ptr() as usize, 3) };
        assert_eq!(copied, vec![9, 8, 7]);
    }
}
