//! Field Descriptor Extractor

use std::fmt;

use tracing::trace;

use super::Record;
use crate::error::{CodecError, Result};
use crate::wire::{lookup, AssignError, WireField, WireKind, WireType, WireValue, SKIP_TAG};

/// Accessor ke field pada instance record
pub struct Access<R> {
    pub get: fn(&R) -> &dyn WireField,
    pub get_mut: fn(&mut R) -> &mut dyn WireField,
}

impl<R> Clone for Access<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Access<R> {}

/// Deklarasi satu field, persis seperti ditulis di struct
pub struct FieldDef<R> {
    pub name: &'static str,
    /// `None` = field tanpa tag
    pub tag: Option<&'static str>,
    /// `None` untuk field skip (tipe bebas, tidak perlu `WireField`)
    pub access: Option<Access<R>>,
}

/// Sumber byte count untuk field `LPBYTE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Literal desimal dari tag
    Count(usize),
    /// Nilai field lain yang sudah di-decode sebelumnya
    Field { name: &'static str, index: usize },
}

/// Field yang ada di wire, sudah di-resolve
pub struct FieldDescriptor<R> {
    pub name: &'static str,
    pub wire: &'static WireType,
    pub sizing: Option<Sizing>,
    pub offset: usize,
    pub(crate) access: Access<R>,
}

impl<R> fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("wire", &self.wire.name)
            .field("sizing", &self.sizing)
            .field("offset", &self.offset)
            .finish()
    }
}

impl<R> FieldDescriptor<R> {
    /// Pastikan tipe Rust field cocok dengan kind wire type
    pub(crate) fn check_kind(&self, record: &'static str, field: &dyn WireField) -> Result<()> {
        if field.kind() == self.wire.kind {
            Ok(())
        } else {
            Err(CodecError::IncompatibleField {
                record,
                field: self.name,
                wire_type: self.wire.name,
            })
        }
    }

    pub(crate) fn assign_error(&self, record: &'static str, err: AssignError) -> CodecError {
        match err {
            AssignError::Incompatible => CodecError::IncompatibleField {
                record,
                field: self.name,
                wire_type: self.wire.name,
            },
            AssignError::Overflow { value, width } => CodecError::ValueOverflow {
                record,
                field: self.name,
                value,
                width,
            },
        }
    }
}

/// Layout wire satu tipe record
pub struct RecordMeta<R> {
    pub name: &'static str,
    /// Total ukuran fixed block dalam bytes
    pub size: usize,
    pub fields: Vec<FieldDescriptor<R>>,
}

impl<R> fmt::Debug for RecordMeta<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordMeta")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<R> RecordMeta<R> {
    /// Ada field yang dibaca lewat pointer
    pub fn has_indirect(&self) -> bool {
        self.fields.iter().any(|fd| fd.wire.kind.is_indirect())
    }

    /// Byte count untuk field `LPBYTE`, dari nilai field sizing yang sudah
    /// di-decode di block yang sama (`staged[i]` milik `fields[i]`)
    pub(crate) fn resolve_count(
        &self,
        fd: &FieldDescriptor<R>,
        staged: &[Option<WireValue>],
    ) -> Result<usize> {
        match fd.sizing {
            Some(Sizing::Count(count)) => Ok(count),
            Some(Sizing::Field { name, index }) => {
                let count = match staged.get(index) {
                    Some(Some(WireValue::Uint(value))) => usize::try_from(*value).ok(),
                    _ => None,
                };
                count.ok_or_else(|| CodecError::UnresolvedSizingOption {
                    record: self.name,
                    field: fd.name,
                    option: name.to_string(),
                })
            }
            None => Ok(0),
        }
    }
}

/// Pisah tag menjadi nama wire type dan sizing option
fn parse_tag(tag: &'static str) -> (&'static str, Option<&'static str>) {
    match tag.split_once(',') {
        Some((name, option)) => {
            let option = option.trim();
            (name.trim(), (!option.is_empty()).then_some(option))
        }
        None => (tag.trim(), None),
    }
}

fn resolve_sizing<R>(
    record: &'static str,
    field: &'static str,
    option: Option<&'static str>,
    earlier: &[FieldDescriptor<R>],
) -> Result<Sizing> {
    let unresolved = || CodecError::UnresolvedSizingOption {
        record,
        field,
        option: option.unwrap_or_default().to_string(),
    };

    let option = option.ok_or_else(unresolved)?;
    if let Ok(count) = option.parse::<usize>() {
        return Ok(Sizing::Count(count));
    }

    // Hanya field wire yang sudah lewat (tidak ada forward reference)
    earlier
        .iter()
        .position(|fd| fd.name == option && fd.wire.kind == WireKind::Unsigned)
        .map(|index| Sizing::Field {
            name: option,
            index,
        })
        .ok_or_else(unresolved)
}

/// Bangun [`RecordMeta`] dari tabel field `R`.
///
/// Urutan error: tag hilang (strict), wire type tidak dikenal, accessor
/// hilang, sizing option. Tidak ada byte yang dibaca atau ditulis di sini.
pub fn describe<R: Record>() -> Result<RecordMeta<R>> {
    let mut meta = RecordMeta {
        name: R::NAME,
        size: 0,
        fields: Vec::with_capacity(R::FIELDS.len()),
    };

    for def in R::FIELDS {
        let tag = match def.tag {
            Some(tag) if tag.trim() == SKIP_TAG => continue,
            Some(tag) => tag,
            None if cfg!(feature = "strict-tags") => {
                return Err(CodecError::MissingTag {
                    record: R::NAME,
                    field: def.name,
                });
            }
            None => continue,
        };

        let (type_name, option) = parse_tag(tag);
        let wire = lookup(type_name).ok_or_else(|| CodecError::UnknownWireType {
            record: R::NAME,
            field: def.name,
            name: type_name.to_string(),
        })?;

        let access = def.access.ok_or(CodecError::MissingField {
            record: R::NAME,
            field: def.name,
        })?;

        // Sizing option hanya berarti untuk LPBYTE, selain itu diabaikan
        let sizing = if wire.kind == WireKind::ByteBuffer {
            Some(resolve_sizing(R::NAME, def.name, option, &meta.fields)?)
        } else {
            None
        };

        meta.fields.push(FieldDescriptor {
            name: def.name,
            wire,
            sizing,
            offset: meta.size,
            access,
        });
        meta.size += wire.size;
    }

    trace!(
        record = meta.name,
        size = meta.size,
        fields = meta.fields.len(),
        "record meta built"
    );

    Ok(meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::win_struct! {
        #[derive(Debug, Default)]
        struct Padded {
            id: u32 => "DWORD",
            kind: u16 => "WORD",
            label: String => "-",
            flags: u16 => "WORD",
            name: String => "LPWSTR",
            count: u32 => "DWORD",
            count_pad: u32 => "DWORD",
            data: Vec<u8> => "LPBYTE, count",
            fixed: Vec<u8> => "LPBYTE,16",
            weight: f64 => "double",
        }
    }

    crate::win_struct! {
        #[derive(Default)]
        struct ForwardRef {
            data: Vec<u8> => "LPBYTE,len",
            len: u32 => "DWORD",
        }
    }

    crate::win_struct! {
        #[derive(Default)]
        struct NoSizing {
            data: Vec<u8> => "LPBYTE",
        }
    }

    crate::win_struct! {
        #[derive(Default)]
        struct TextSizing {
            name: String => "LPWSTR",
            data: Vec<u8> => "LPBYTE,name",
        }
    }

    crate::win_struct! {
        #[derive(Default)]
        struct Unknown {
            id: u32 => "DWORD",
            value: u32 => "ULONG",
        }
    }

    crate::win_struct! {
        #[derive(Default)]
        struct Untagged {
            id: u32 => "DWORD",
            note: String,
        }
    }

    crate::win_struct! {
        #[derive(Default)]
        struct LooseSkip {
            id: u32 => "DWORD",
            spare: u32 => " - ",
        }
    }

    crate::win_struct! {
        #[derive(Default)]
        struct SignedSizing {
            len: i32 => "DWORD",
            len_pad: u32 => "DWORD",
            data: Vec<u8> => "LPBYTE,len",
        }
    }

    #[allow(dead_code)]
    struct HandWritten {
        id: u32,
    }

    fn hand_id(r: &HandWritten) -> &dyn WireField {
        &r.id
    }

    fn hand_id_mut(r: &mut HandWritten) -> &mut dyn WireField {
        &mut r.id
    }

    impl Record for HandWritten {
        const NAME: &'static str = "HandWritten";
        const FIELDS: &'static [FieldDef<Self>] = &[
            FieldDef {
                name: "id",
                tag: Some("DWORD"),
                access: Some(Access {
                    get: hand_id,
                    get_mut: hand_id_mut,
                }),
            },
            FieldDef {
                name: "ghost",
                tag: Some("DWORD"),
                access: None,
            },
        ];

        fn meta() -> Result<&'static RecordMeta<Self>> {
            unreachable!("describe() dipanggil langsung di test")
        }
    }

    #[test]
    fn test_describe_order_and_offsets() {
        let meta = describe::<Padded>().unwrap();
        let layout: Vec<(&str, &str, usize)> = meta
            .fields
            .iter()
            .map(|fd| (fd.name, fd.wire.name, fd.offset))
            .collect();

        assert_eq!(
            layout,
            vec![
                ("id", "DWORD", 0),
                ("kind", "WORD", 4),
                ("flags", "WORD", 6),
                ("name", "LPWSTR", 8),
                ("count", "DWORD", 16),
                ("count_pad", "DWORD", 20),
                ("data", "LPBYTE", 24),
                ("fixed", "LPBYTE", 32),
                ("weight", "double", 40),
            ]
        );
        assert_eq!(meta.size, 48);
        assert!(meta.has_indirect());
    }

    #[test]
    fn test_sizing_resolution() {
        let meta = describe::<Padded>().unwrap();
        let data = meta.fields.iter().find(|fd| fd.name == "data").unwrap();
        assert_eq!(
            data.sizing,
            Some(Sizing::Field {
                name: "count",
                index: 4
            })
        );
        let fixed = meta.fields.iter().find(|fd| fd.name == "fixed").unwrap();
        assert_eq!(fixed.sizing, Some(Sizing::Count(16)));
    }

    #[test]
    fn test_forward_reference_rejected() {
        let err = describe::<ForwardRef>().unwrap_err();
        assert_eq!(
            err,
            CodecError::UnresolvedSizingOption {
                record: "ForwardRef",
                field: "data",
                option: "len".into(),
            }
        );
    }

    #[test]
    fn test_byte_buffer_needs_sizing() {
        assert!(matches!(
            describe::<NoSizing>(),
            Err(CodecError::UnresolvedSizingOption { field: "data", .. })
        ));
    }

    #[test]
    fn test_sizing_field_must_be_numeric() {
        assert!(matches!(
            describe::<TextSizing>(),
            Err(CodecError::UnresolvedSizingOption { field: "data", .. })
        ));
    }

    #[test]
    fn test_unknown_wire_type() {
        let err = describe::<Unknown>().unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownWireType {
                record: "Unknown",
                field: "value",
                name: "ULONG".into(),
            }
        );
    }

    #[test]
    fn test_missing_accessor() {
        let err = describe::<HandWritten>().unwrap_err();
        assert_eq!(
            err,
            CodecError::MissingField {
                record: "HandWritten",
                field: "ghost",
            }
        );
    }

    #[cfg(not(feature = "strict-tags"))]
    #[test]
    fn test_untagged_field_is_skipped() {
        let meta = describe::<Untagged>().unwrap();
        assert_eq!(meta.size, 4);
        assert_eq!(meta.fields.len(), 1);
    }

    #[cfg(feature = "strict-tags")]
    #[test]
    fn test_untagged_field_is_error() {
        assert_eq!(
            describe::<Untagged>().unwrap_err(),
            CodecError::MissingTag {
                record: "Untagged",
                field: "note",
            }
        );
    }

    #[test]
    fn test_padded_skip_tag_is_skipped() {
        let meta = describe::<LooseSkip>().unwrap();
        assert_eq!(meta.size, 4);
        assert_eq!(meta.fields.len(), 1);
    }

    #[test]
    fn test_signed_sizing_field() {
        let meta = describe::<SignedSizing>().unwrap();
        assert_eq!(
            meta.fields[2].sizing,
            Some(Sizing::Field {
                name: "len",
                index: 0
            })
        );
    }

    #[test]
    fn test_parse_tag() {
        assert_eq!(parse_tag("LPBYTE,Size"), ("LPBYTE", Some("Size")));
        assert_eq!(parse_tag("LPBYTE, 8 "), ("LPBYTE", Some("8")));
        assert_eq!(parse_tag("DWORD"), ("DWORD", None));
        assert_eq!(parse_tag("DWORD,"), ("DWORD", None));
    }
}
