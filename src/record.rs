//! Declarative macro for record (named-field, map-backed) shapes, in the idiom of this
//! codebase's other field-list macros.
//!
//! `cbor_record!` declares a struct and generates `Encode`/`Decode` impls that represent it as
//! a major type 5 map: one text-string key per field, in declaration order, with unknown keys
//! skipped rather than decoded.

/// Resolves what happens when a declared field's key never appeared in a decoded map: a
/// `required` field fails the decode with `MissingRequiredField`; an `optional` field's declared
/// type must implement `Default` (as `Option<T>` does) and falls back to it.
#[macro_export]
macro_rules! __cbor_field_missing {
    (required, $ty:ty, $name:expr) => {
        return Err($crate::result::Error::MissingRequiredField($name))
    };
    (optional, $ty:ty, $name:expr) => {
        <$ty as ::std::default::Default>::default()
    };
}

/// Declares a record: a struct whose fields each become one key/value pair of a CBOR map (major
/// type 5), keyed by the field's own name.
///
/// Each field is marked `required` or `optional`. An `optional` field's declared type should
/// itself be `Option<_>` (or otherwise `Default`); when its key is absent from a decoded map, the
/// field is set to its default rather than failing the decode. A `required` field absent from the
/// map fails with [`crate::result::Error::MissingRequiredField`].
///
/// ```ignore
/// cbor_record! {
///     pub struct Person {
///         required name: String,
///         required age: u32,
///         optional nickname: Option<String>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! cbor_record {
    (
        $(#[$smeta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $reqopt:ident $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$smeta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )*
        }

        impl $crate::value::Encode for $name {
            fn encode<S: $crate::io::ByteSink>(
                &self,
                enc: &mut $crate::codec::Encoder<S>,
            ) -> $crate::result::Result<()> {
                let depth = enc.depth();
                let _guard = depth.enter()?;
                let field_count = [$(stringify!($field)),*].len();
                $crate::head::encode_head(enc.sink(), $crate::constants::MT_MAP, field_count as u64)?;
                $(
                    $crate::value::Encode::encode(stringify!($field), enc)?;
                    $crate::value::Encode::encode(&self.$field, enc)?;
                )*
                Ok(())
            }
        }

        impl $crate::value::Decode for $name {
            fn decode<S: $crate::io::ByteSource>(
                dec: &mut $crate::codec::Decoder<S>,
            ) -> $crate::result::Result<Self> {
                let depth = dec.depth();
                let _guard = depth.enter()?;

                let head = $crate::head::decode_head(dec.source())?;
                if head.major_type != $crate::constants::MT_MAP {
                    return Err($crate::result::Error::TypeMismatch(stringify!($name)));
                }
                let indefinite = matches!(head.argument, $crate::head::Argument::Indefinite);
                if indefinite && !*dec.config().enable_indefinite_length() {
                    return Err($crate::result::Error::InvalidIndefiniteLength);
                }
                let max_collection_size = *dec.config().max_collection_size();
                let total_entries = match head.argument {
                    $crate::head::Argument::Definite(n) => {
                        if n as usize > max_collection_size {
                            return Err($crate::result::Error::InvalidLength(
                                concat!(stringify!($name), ": exceeds max_collection_size"),
                            ));
                        }
                        Some(n as usize)
                    }
                    $crate::head::Argument::Indefinite => None,
                };

                $( let mut $field: Option<$ty> = None; )*

                let allow_dup = *dec.config().allow_duplicate_keys();
                let mut seen_keys: ::std::collections::HashSet<String> =
                    ::std::collections::HashSet::new();
                let mut index = 0usize;
                loop {
                    match total_entries {
                        Some(n) => {
                            if index >= n {
                                break;
                            }
                        }
                        None => {
                            if $crate::head::peek_is_break(dec.source())? {
                                dec.source().read_byte()?;
                                break;
                            }
                            if index >= max_collection_size {
                                return Err($crate::result::Error::InvalidLength(
                                    concat!(stringify!($name), ": exceeds max_collection_size"),
                                ));
                            }
                        }
                    }

                    let key = <String as $crate::value::Decode>::decode(dec)?;
                    if !seen_keys.insert(key.clone()) && !allow_dup {
                        return Err($crate::result::Error::MalformedInput(
                            "duplicate key in record",
                        ));
                    }
                    match key.as_str() {
                        $(
                            stringify!($field) => {
                                $field = Some(<$ty as $crate::value::Decode>::decode(dec)?);
                            }
                        )*
                        _ => {
                            let depth_handle = dec.depth();
                            $crate::walk::skip(dec.source(), &depth_handle)?;
                        }
                    }
                    index += 1;
                }

                Ok(Self {
                    $(
                        $field: match $field {
                            Some(v) => v,
                            None => $crate::__cbor_field_missing!($reqopt, $ty, stringify!($field)),
                        },
                    )*
                })
            }
        }
    };
}
