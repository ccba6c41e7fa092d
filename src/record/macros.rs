//! `win_struct!`: deklarasi record beserta tag wire-nya.
//!
//! ```
//! use winstruct::win_struct;
//!
//! win_struct! {
//!     #[derive(Debug, Default)]
//!     pub struct ImageInfo {
//!         pub size: u32 => "DWORD",
//!         pub size_pad: u32 => "DWORD",
//!         pub data: Vec<u8> => "LPBYTE,size",
//!         pub label: String => "-",
//!     }
//! }
//!
//! assert_eq!(winstruct::wire_size::<ImageInfo>().unwrap(), 16);
//! ```
//!
//! Field tanpa `=> "TAG"` diperlakukan seperti `"-"` (kecuali feature
//! `strict-tags`). Field wire harus implement [`WireField`](crate::WireField).
//! Struct generic tidak didukung.
//!
//! Field skip boleh bertipe apa saja hanya jika tag-nya persis literal `"-"`:
//! macro mencocokkan token, bukan isi string. Varian berspasi seperti `" - "`
//! tetap di-skip oleh [`describe`](crate::describe), tapi tipenya harus
//! implement `WireField` karena accessor tetap dibuat.

#[macro_export]
macro_rules! win_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $fty:ty $(=> $tag:tt)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $fty,
            )*
        }

        impl $crate::Record for $name {
            const NAME: &'static str = stringify!($name);

            const FIELDS: &'static [$crate::FieldDef<Self>] = &[
                $(
                    $crate::FieldDef {
                        name: stringify!($field),
                        tag: $crate::__wire_tag!($($tag)?),
                        access: $crate::__wire_access!($name, $field $(, $tag)?),
                    },
                )*
            ];

            fn meta() -> $crate::Result<&'static $crate::RecordMeta<Self>> {
                static META: ::std::sync::OnceLock<$crate::Result<$crate::RecordMeta<$name>>> =
                    ::std::sync::OnceLock::new();
                META.get_or_init($crate::describe::<$name>)
                    .as_ref()
                    .map_err(::core::clone::Clone::clone)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_tag {
    () => {
        ::core::option::Option::None
    };
    ($tag:tt) => {
        ::core::option::Option::Some($tag)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __wire_access {
    ($name:ident, $field:ident) => {
        ::core::option::Option::None
    };
    ($name:ident, $field:ident, "-") => {
        ::core::option::Option::None
    };
    ($name:ident, $field:ident, $tag:tt) => {
        ::core::option::Option::Some($crate::Access {
            get: {
                fn get(r: &$name) -> &dyn $crate::WireField {
                    &r.$field
                }
                get
            },
            get_mut: {
                fn get_mut(r: &mut $name) -> &mut dyn $crate::WireField {
                    &mut r.$field
                }
                get_mut
            },
        })
    };
}
