//! A deterministic-subset CBOR (RFC 8949) codec: a byte-layer head protocol, a type-directed
//! value codec generic over buffer and stream substrates, and a structural walker for
//! interpretation-free traversal.
//!
//! The pieces compose bottom-up:
//!
//! - [`io`] — the [`io::ByteSource`]/[`io::ByteSink`] substrate traits, plus the buffer
//!   ([`io::SliceSource`]/[`io::SliceSink`]) and stream ([`io::ReaderSource`]/[`io::WriterSink`])
//!   implementations.
//! - [`head`] — the initial-byte / length-argument protocol shared by every major type.
//! - [`value`] — the [`value::Encode`]/[`value::Decode`] traits and their impls for the built-in
//!   shapes (integers, floats, bool, strings, byte strings, fixed arrays, `Vec`, `Option`).
//! - [`record`] — the [`cbor_record!`] macro for declaring named-field map types.
//! - [`walk`] — [`walk::skip`] and [`walk::extract_field`], which traverse an encoded item
//!   without fully materializing it.
//! - [`codec`] — [`codec::Encoder`]/[`codec::Decoder`], the stateful entry points that tie a
//!   substrate to a [`Config`] and a shared depth budget.
//!
//! Most callers only need the free functions below plus [`Config`]; reach for [`codec::Encoder`]
//! / [`codec::Decoder`] directly when a session spans more than one call, or when the zero-copy
//! `decode_str_ref` / `decode_bytes_ref` accessors on a slice-backed decoder are needed.

pub mod codec;
pub mod config;
pub mod constants;
pub mod depth;
pub mod head;
pub mod io;
pub mod record;
pub mod result;
pub mod value;
pub mod walk;

pub use codec::{Decoder, Encoder};
pub use config::Config;
pub use io::{ByteSink, ByteSource, ReaderSource, SliceSink, SliceSource, WriterSink};
pub use result::{Error, Result};
pub use value::{ByteBuf, Decode, Encode};

/// Encode `value` into `sink` using `config`, returning the sink once the item is flushed.
///
/// A thin wrapper over [`Encoder::new`] / [`Encoder::encode`] / [`Encoder::finish`] for callers
/// who only need to encode a single item and do not otherwise need to hold onto an `Encoder`.
pub fn encode<S: ByteSink, T: Encode + ?Sized>(value: &T, sink: S, config: Config) -> Result<S> {
    let mut enc = Encoder::new(sink, config);
    enc.encode(value)?;
    enc.finish()
}

/// Decode a single complete item of type `T` from `source` using `config`.
pub fn decode<S: ByteSource, T: Decode>(source: S, config: Config) -> Result<T> {
    let mut dec = Decoder::new(source, config);
    dec.decode()
}

/// Consume and discard a single complete item from `source` using `config`, without
/// materializing it as a value.
pub fn skip<S: ByteSource>(source: S, config: Config) -> Result<()> {
    let mut dec = Decoder::new(source, config);
    dec.skip()
}

/// Traverse a single encoded map from `source`, decoding and returning the value for `key`, or
/// `None` if no entry matches.
pub fn extract_field<S: ByteSource, T: Decode>(
    source: S,
    config: Config,
    key: &str,
) -> Result<Option<T>> {
    let mut dec = Decoder::new(source, config);
    dec.extract_field(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_functions_roundtrip_through_a_buffer() {
        let mut buf = [0u8; 64];
        let sink = encode(&42u32, SliceSink::new(&mut buf), Config::default()).unwrap();
        let written = sink.position();
        let back: u32 = decode(SliceSource::new(&buf[..written]), Config::default()).unwrap();
        assert_eq!(back, 42);
    }

    #[test]
    fn free_function_skip_consumes_one_item() {
        let mut buf = [0u8; 64];
        let sink = encode(&vec![1u32, 2, 3], SliceSink::new(&mut buf), Config::default()).unwrap();
        let written = sink.position();
        skip(SliceSource::new(&buf[..written]), Config::default()).unwrap();
    }

    #[test]
    fn free_function_extract_field_finds_key() {
        crate::cbor_record! {
            struct Pair {
                required a: u32,
                required b: u32,
            }
        }
        let mut buf = [0u8; 64];
        let sink = encode(
            &Pair { a: 1, b: 2 },
            SliceSink::new(&mut buf),
            Config::default(),
        )
        .unwrap();
        let written = sink.position();
        let b: Option<u32> =
            extract_field(SliceSource::new(&buf[..written]), Config::default(), "b").unwrap();
        assert_eq!(b, Some(2));
    }
}
