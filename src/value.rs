//! Type-directed value codec (C3): `Encode`/`Decode` traits and their impls for every shape this
//! core serializes, dispatched at compile time by the shape of `Self` — no runtime reflection.

use crate::codec::{Decoder, Encoder};
use crate::constants::*;
use crate::head::{decode_head, encode_head, Argument, Head};
use crate::io::{ByteSink, ByteSource, SliceSource};
use crate::result::{Error, Result};

/// Serialize `Self` as one complete CBOR item.
pub trait Encode {
    /// Write `self` to `enc`.
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()>;
}

/// Deserialize `Self` from one complete CBOR item.
pub trait Decode: Sized {
    /// Read a value of `Self`'s shape from `dec`.
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self>;
}

fn checked_length(head: &Head, limit: usize, what: &'static str) -> Result<usize> {
    let n = head.argument.require_definite(what)?;
    if n > limit as u64 {
        return Err(Error::InvalidLength(what));
    }
    Ok(n as usize)
}

macro_rules! impl_uint {
    ($t:ty) => {
        impl Encode for $t {
            fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
                encode_head(enc.sink(), MT_UINT, *self as u64)
            }
        }

        impl Decode for $t {
            fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
                let head = decode_head(dec.source())?;
                if head.major_type != MT_UINT {
                    log::debug!(
                        "expected major type {} ({}), found {}",
                        MT_UINT,
                        stringify!($t),
                        head.major_type
                    );
                    return Err(Error::TypeMismatch(stringify!($t)));
                }
                let v = head.argument.require_definite(stringify!($t))?;
                <$t>::try_from(v).map_err(|_| Error::IntegerOverflow)
            }
        }
    };
}

impl_uint!(u8);
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);

macro_rules! impl_int {
    ($t:ty) => {
        impl Encode for $t {
            fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
                let v = *self as i128;
                if v >= 0 {
                    encode_head(enc.sink(), MT_UINT, v as u64)
                } else {
                    encode_head(enc.sink(), MT_NINT, (-v - 1) as u64)
                }
            }
        }

        impl Decode for $t {
            fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
                let head = decode_head(dec.source())?;
                match head.major_type {
                    MT_UINT => {
                        let v = head.argument.require_definite(stringify!($t))? as i128;
                        <$t>::try_from(v).map_err(|_| Error::IntegerOverflow)
                    }
                    MT_NINT => {
                        let arg = head.argument.require_definite(stringify!($t))? as i128;
                        let n = -(arg + 1);
                        <$t>::try_from(n).map_err(|_| Error::IntegerOverflow)
                    }
                    other => {
                        log::debug!(
                            "expected major type 0 or 1 ({}), found {}",
                            stringify!($t),
                            other
                        );
                        Err(Error::TypeMismatch(stringify!($t)))
                    }
                }
            }
        }
    };
}

impl_int!(i8);
impl_int!(i16);
impl_int!(i32);
impl_int!(i64);

impl Encode for bool {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        let ai = if *self { SIMPLE_TRUE } else { SIMPLE_FALSE };
        enc.sink().write_byte((MT_SIMPLE << MT_SHIFT) | ai)
    }
}

impl Decode for bool {
    // Reads only the initial byte, not a full head: the AIs this shape accepts or rejects never
    // carry trailing argument bytes, and a malformed follower must not be required just to reject
    // an unsupported simple value or the wrong major type.
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let byte = dec.source().read_byte()?;
        let major_type = byte >> MT_SHIFT;
        let ai = byte & AI_MASK;
        if major_type != MT_SIMPLE {
            return Err(Error::TypeMismatch("bool"));
        }
        match ai {
            SIMPLE_FALSE => Ok(false),
            SIMPLE_TRUE => Ok(true),
            _ => Err(Error::InvalidBool),
        }
    }
}

impl Encode for () {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        enc.sink().write_byte(NULL_BYTE)
    }
}

impl Decode for () {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let byte = dec.source().read_byte()?;
        if byte == NULL_BYTE {
            Ok(())
        } else {
            Err(Error::TypeMismatch("()"))
        }
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        match self {
            Some(v) => v.encode(enc),
            None => enc.sink().write_byte(NULL_BYTE),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        if dec.source().peek_byte()? == NULL_BYTE {
            dec.source().read_byte()?;
            Ok(None)
        } else {
            Ok(Some(T::decode(dec)?))
        }
    }
}

fn decode_float_head<S: ByteSource>(
    dec: &mut Decoder<S>,
    expected_ai: u8,
    what: &'static str,
) -> Result<u64> {
    let head = decode_head(dec.source())?;
    if head.major_type != MT_SIMPLE {
        return Err(Error::TypeMismatch(what));
    }
    if head.ai != expected_ai {
        return Err(Error::InvalidFloat);
    }
    head.argument.require_definite(what)
}

impl Encode for half::f16 {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        let sink = enc.sink();
        sink.write_byte((MT_SIMPLE << MT_SHIFT) | FLOAT_HALF)?;
        sink.write_bytes(&self.to_bits().to_be_bytes())
    }
}

impl Decode for half::f16 {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let bits = decode_float_head(dec, FLOAT_HALF, "f16")? as u16;
        Ok(half::f16::from_bits(bits))
    }
}

impl Encode for f32 {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        let sink = enc.sink();
        sink.write_byte((MT_SIMPLE << MT_SHIFT) | FLOAT_SINGLE)?;
        sink.write_bytes(&self.to_bits().to_be_bytes())
    }
}

impl Decode for f32 {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let bits = decode_float_head(dec, FLOAT_SINGLE, "f32")? as u32;
        Ok(f32::from_bits(bits))
    }
}

impl Encode for f64 {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        let sink = enc.sink();
        sink.write_byte((MT_SIMPLE << MT_SHIFT) | FLOAT_DOUBLE)?;
        sink.write_bytes(&self.to_bits().to_be_bytes())
    }
}

impl Decode for f64 {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let bits = decode_float_head(dec, FLOAT_DOUBLE, "f64")?;
        Ok(f64::from_bits(bits))
    }
}

impl Encode for str {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        let bytes = self.as_bytes();
        if bytes.len() > *enc.config().max_string_length() {
            return Err(Error::InvalidLength("text string exceeds max_string_length"));
        }
        encode_head(enc.sink(), MT_TSTR, bytes.len() as u64)?;
        enc.sink().write_bytes(bytes)
    }
}

impl Encode for String {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        self.as_str().encode(enc)
    }
}

impl Decode for String {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let head = decode_head(dec.source())?;
        if head.major_type != MT_TSTR {
            return Err(Error::TypeMismatch("String"));
        }
        let len = checked_length(&head, *dec.config().max_string_length(), "String")?;
        let mut buf = vec![0u8; len];
        dec.source().read_exact(&mut buf)?;
        // `validate_utf8 = false` is not honored here: decoding into `String` carries Rust's
        // UTF-8 invariant regardless of configuration, and the wire bytes are not trusted input.
        // A caller that wants the unvalidated payload should decode a `ByteBuf` instead.
        String::from_utf8(buf).map_err(Error::from)
    }
}

/// A CBOR byte string (major type 2), kept distinct from `Vec<u8>` (an array of unsigned
/// integers, major type 4) so the two are never confused at the type level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteBuf(Vec<u8>);

impl ByteBuf {
    /// Wrap an owned byte vector.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Unwrap to the owned byte vector.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for ByteBuf {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Encode for ByteBuf {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        if self.0.len() > *enc.config().max_string_length() {
            return Err(Error::InvalidLength("byte string exceeds max_string_length"));
        }
        encode_head(enc.sink(), MT_BSTR, self.0.len() as u64)?;
        enc.sink().write_bytes(&self.0)
    }
}

impl Decode for ByteBuf {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let head = decode_head(dec.source())?;
        if head.major_type != MT_BSTR {
            return Err(Error::TypeMismatch("ByteBuf"));
        }
        let len = checked_length(&head, *dec.config().max_string_length(), "ByteBuf")?;
        let mut buf = vec![0u8; len];
        dec.source().read_exact(&mut buf)?;
        Ok(ByteBuf(buf))
    }
}

/// Zero-copy decode of a text string directly out of a slice-backed source. Only reachable
/// through [`Decoder::decode_str_ref`], which is why this lives here rather than on `Decode`.
pub(crate) fn decode_text_span<'b>(dec: &mut Decoder<SliceSource<'b>>) -> Result<&'b str> {
    let head = decode_head(dec.source())?;
    if head.major_type != MT_TSTR {
        return Err(Error::TypeMismatch("&str"));
    }
    let limit = *dec.config().max_string_length();
    let len = checked_length(&head, limit, "&str")?;
    let span = dec.source().read_span(len)?;
    // Always validated, independent of `Config::validate_utf8` — see the comment on the
    // `String` decode impl above.
    std::str::from_utf8(span).map_err(Error::from)
}

/// Zero-copy decode of a byte string directly out of a slice-backed source. Only reachable
/// through [`Decoder::decode_bytes_ref`].
pub(crate) fn decode_byte_span<'b>(dec: &mut Decoder<SliceSource<'b>>) -> Result<&'b [u8]> {
    let head = decode_head(dec.source())?;
    if head.major_type != MT_BSTR {
        return Err(Error::TypeMismatch("&[u8]"));
    }
    let limit = *dec.config().max_string_length();
    let len = checked_length(&head, limit, "&[u8]")?;
    dec.source().read_span(len)
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        let depth = enc.depth();
        let _guard = depth.enter()?;
        encode_head(enc.sink(), MT_ARRAY, N as u64)?;
        for item in self.iter() {
            item.encode(enc)?;
        }
        Ok(())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let depth = dec.depth();
        let _guard = depth.enter()?;
        let head = decode_head(dec.source())?;
        if head.major_type != MT_ARRAY {
            return Err(Error::TypeMismatch("[T; N]"));
        }
        let indefinite = matches!(head.argument, Argument::Indefinite);
        if indefinite && !*dec.config().enable_indefinite_length() {
            return Err(Error::InvalidIndefiniteLength);
        }
        if let Argument::Definite(count) = head.argument {
            if count != N as u64 {
                return Err(Error::InvalidLength("[T; N]: declared length does not match N"));
            }
        }

        let mut items: Vec<T> = Vec::with_capacity(N);
        for _ in 0..N {
            if indefinite && crate::head::peek_is_break(dec.source())? {
                return Err(Error::InvalidLength("[T; N]: break marker before N elements"));
            }
            items.push(T::decode(dec)?);
        }
        if indefinite {
            if !crate::head::peek_is_break(dec.source())? {
                return Err(Error::InvalidLength("[T; N]: extra elements beyond N"));
            }
            dec.source().read_byte()?;
        }
        items
            .try_into()
            .map_err(|_| Error::InvalidLength("[T; N]: element count mismatch"))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<S: ByteSink>(&self, enc: &mut Encoder<S>) -> Result<()> {
        let depth = enc.depth();
        let _guard = depth.enter()?;
        encode_head(enc.sink(), MT_ARRAY, self.len() as u64)?;
        for item in self {
            item.encode(enc)?;
        }
        Ok(())
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<S: ByteSource>(dec: &mut Decoder<S>) -> Result<Self> {
        let depth = dec.depth();
        let _guard = depth.enter()?;
        let head = decode_head(dec.source())?;
        if head.major_type != MT_ARRAY {
            return Err(Error::TypeMismatch("Vec<T>"));
        }
        let max_collection_size = *dec.config().max_collection_size();
        match head.argument {
            Argument::Definite(_) => {
                let count = checked_length(&head, max_collection_size, "Vec<T>")?;
                let mut out = Vec::new();
                out.try_reserve(count).map_err(|_| Error::OutOfMemory)?;
                for _ in 0..count {
                    out.push(T::decode(dec)?);
                }
                Ok(out)
            }
            Argument::Indefinite => {
                if !*dec.config().enable_indefinite_length() {
                    return Err(Error::InvalidIndefiniteLength);
                }
                let mut out = Vec::new();
                while !crate::head::peek_is_break(dec.source())? {
                    if out.len() >= max_collection_size {
                        return Err(Error::InvalidLength("Vec<T>: exceeds max_collection_size"));
                    }
                    out.push(T::decode(dec)?);
                }
                dec.source().read_byte()?;
                Ok(out)
            }
        }
    }
}
