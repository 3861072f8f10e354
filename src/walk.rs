//! Structural walker (C5): consume a complete encoded item without interpreting its contents, and
//! extract a single named field out of an encoded map without materializing the rest of it.

use crate::codec::Decoder;
use crate::constants::*;
use crate::depth::DepthGauge;
use crate::head::{decode_head, peek_is_break, Argument};
use crate::io::ByteSource;
use crate::result::{Error, Result};
use crate::value::Decode;

/// Consume exactly one complete encoded item, discarding it, without materializing any of its
/// contents as a value.
///
/// `decode_head` already consumes any argument bytes an initial byte declares (AI 24–27), so
/// major type 7 (float/simple) needs no further action here regardless of AI — only the
/// variable-length payloads of MT 2/3/4/5 require extra consumption.
pub fn skip<S: ByteSource>(source: &mut S, depth: &DepthGauge) -> Result<()> {
    let head = decode_head(source)?;
    match head.major_type {
        MT_UINT | MT_NINT => {
            head.argument.require_definite("integer")?;
            Ok(())
        }
        MT_BSTR | MT_TSTR => skip_string_payload(source, head.major_type, head.argument),
        MT_ARRAY => {
            let _guard = depth.enter()?;
            match head.argument {
                Argument::Definite(n) => {
                    for _ in 0..n {
                        skip(source, depth)?;
                    }
                    Ok(())
                }
                Argument::Indefinite => skip_entries_until_break(source, depth, 1),
            }
        }
        MT_MAP => {
            let _guard = depth.enter()?;
            match head.argument {
                Argument::Definite(n) => {
                    for _ in 0..n.saturating_mul(2) {
                        skip(source, depth)?;
                    }
                    Ok(())
                }
                Argument::Indefinite => skip_entries_until_break(source, depth, 2),
            }
        }
        MT_TAG => {
            head.argument.require_definite("tag")?;
            skip(source, depth)
        }
        MT_SIMPLE => {
            if matches!(head.argument, Argument::Indefinite) {
                // The break marker (MT 7, AI 31) consumed here is not closing any frame this call
                // opened — it belongs to a parent indefinite item, or there is none.
                Err(Error::InvalidBreakCode)
            } else {
                Ok(())
            }
        }
        other => Err(Error::InvalidAdditionalInfo(head.ai, other)),
    }
}

fn skip_entries_until_break<S: ByteSource>(
    source: &mut S,
    depth: &DepthGauge,
    items_per_entry: usize,
) -> Result<()> {
    loop {
        if peek_is_break(source)? {
            source.read_byte()?;
            return Ok(());
        }
        for _ in 0..items_per_entry {
            skip(source, depth)?;
        }
    }
}

fn skip_string_payload<S: ByteSource>(
    source: &mut S,
    major_type: u8,
    argument: Argument,
) -> Result<()> {
    match argument {
        Argument::Definite(n) => source.skip_bytes(n as usize),
        Argument::Indefinite => loop {
            if peek_is_break(source)? {
                source.read_byte()?;
                return Ok(());
            }
            let chunk_head = decode_head(source)?;
            if chunk_head.major_type != major_type {
                return Err(Error::TypeMismatch("indefinite-length string chunk"));
            }
            let len = chunk_head.argument.require_definite("string chunk")?;
            source.skip_bytes(len as usize)?;
        },
    }
}

/// Traverse an encoded map, decoding and returning the value for `key`, or `None` if no entry
/// matches. Non-matching entries are skipped rather than decoded, so the caller never pays to
/// materialize fields it did not ask for.
///
/// Restores the source position before returning — on success, on "key not found", and on
/// error alike — so repeated calls against the same map give the same answer on every
/// substrate, not only a slice-backed one. This is implemented through
/// [`ByteSource::mark`]/[`ByteSource::rewind`] rather than a buffer-only saved offset, since a
/// stream substrate cannot seek its underlying reader backwards: `rewind` there replays the
/// bytes this call already consumed instead.
pub fn extract_field<S: ByteSource, T: Decode>(dec: &mut Decoder<S>, key: &str) -> Result<Option<T>> {
    dec.source().mark();
    let result = extract_field_uncommitted(dec, key);
    dec.source().rewind();
    result
}

fn extract_field_uncommitted<S: ByteSource, T: Decode>(
    dec: &mut Decoder<S>,
    key: &str,
) -> Result<Option<T>> {
    let depth = dec.depth();
    let _guard = depth.enter()?;

    let head = decode_head(dec.source())?;
    if head.major_type != MT_MAP {
        return Err(Error::TypeMismatch("extract_field: not a map"));
    }
    let indefinite = matches!(head.argument, Argument::Indefinite);
    if indefinite && !*dec.config().enable_indefinite_length() {
        return Err(Error::InvalidIndefiniteLength);
    }
    let total_entries = match head.argument {
        Argument::Definite(n) => Some(n as usize),
        Argument::Indefinite => None,
    };

    let mut index = 0usize;
    loop {
        match total_entries {
            Some(n) if index >= n => return Ok(None),
            None if peek_is_break(dec.source())? => {
                dec.source().read_byte()?;
                return Ok(None);
            }
            _ => {}
        }

        let entry_key = <String as Decode>::decode(dec)?;
        if entry_key == key {
            return Ok(Some(T::decode(dec)?));
        }
        skip(dec.source(), &depth)?;
        index += 1;
    }
}
