//! The initial-byte / length protocol (C2): encoding and decoding the `(major type, argument)`
//! pair through the five length classes (inline, and 1/2/4/8 follower bytes).

use crate::constants::*;
use crate::io::{ByteSink, ByteSource};
use crate::result::{Error, Result};

/// The decoded argument of a head: either a definite count/length/value, or the indefinite
/// marker (AI 31), which is only legal for major types 2, 3, 4, and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Definite(u64),
    Indefinite,
}

impl Argument {
    /// The definite value, or `TypeMismatch` if this is an indefinite-length marker.
    pub fn require_definite(self, what: &'static str) -> Result<u64> {
        match self {
            Argument::Definite(v) => Ok(v),
            Argument::Indefinite => Err(Error::TypeMismatch(what)),
        }
    }
}

/// One decoded head: the major type, the raw additional-info bits, and the resulting argument.
///
/// `ai` is kept alongside `argument` because major type 7 overloads the 2/4/8-byte argument
/// classes as float-width selectors: two different AIs can decode to numerically compatible
/// argument values, so only the raw AI distinguishes "half-precision bit pattern" from "a
/// definite-length argument that happens to read the same bytes".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    pub major_type: u8,
    pub ai: u8,
    pub argument: Argument,
}

/// Number of extra bytes the smallest length class for `u` requires, not counting the initial
/// byte itself. Used both to pick the additional-info value on encode and to check minimality
/// of a decoded head.
pub fn class_extra_bytes(u: u64) -> usize {
    match u {
        0..=23 => 0,
        24..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFFFF_FFFF => 4,
        _ => 8,
    }
}

/// Write a definite-length head: initial byte plus (if needed) big-endian argument bytes.
///
/// Chooses the smallest length class that fits `argument`.
pub fn encode_head<S: ByteSink>(sink: &mut S, major_type: u8, argument: u64) -> Result<()> {
    debug_assert!(major_type <= 7);
    match argument {
        0..=23 => sink.write_byte((major_type << MT_SHIFT) | argument as u8),
        24..=0xFF => {
            sink.write_byte((major_type << MT_SHIFT) | AI_ONE_BYTE)?;
            sink.write_uint_be(argument, 1)
        }
        0x100..=0xFFFF => {
            sink.write_byte((major_type << MT_SHIFT) | AI_TWO_BYTES)?;
            sink.write_uint_be(argument, 2)
        }
        0x1_0000..=0xFFFF_FFFF => {
            sink.write_byte((major_type << MT_SHIFT) | AI_FOUR_BYTES)?;
            sink.write_uint_be(argument, 4)
        }
        _ => {
            sink.write_byte((major_type << MT_SHIFT) | AI_EIGHT_BYTES)?;
            sink.write_uint_be(argument, 8)
        }
    }
}

/// Write the initial byte of an indefinite-length item: `(major_type << 5) | 31`.
///
/// Only major types 2 (byte string), 3 (text string), 4 (array), and 5 (map) may use this.
pub fn encode_indefinite_head<S: ByteSink>(sink: &mut S, major_type: u8) -> Result<()> {
    debug_assert!(matches!(major_type, MT_BSTR | MT_TSTR | MT_ARRAY | MT_MAP));
    sink.write_byte((major_type << MT_SHIFT) | AI_INDEFINITE)
}

/// Read one head: the initial byte, plus any big-endian argument bytes it declares.
///
/// AI 28–30 fail with [`Error::InvalidAdditionalInfo`]; AI 31 yields [`Argument::Indefinite`]
/// regardless of major type — callers are responsible for rejecting it on MTs where it is not
/// legal (0, 1, 6, 7).
pub fn decode_head<S: ByteSource>(source: &mut S) -> Result<Head> {
    let byte = source.read_byte()?;
    let major_type = byte >> MT_SHIFT;
    let ai = byte & AI_MASK;
    let argument = match ai {
        0..=AI_MAX_INLINE => Argument::Definite(ai as u64),
        AI_ONE_BYTE => Argument::Definite(source.read_uint_be(1)?),
        AI_TWO_BYTES => Argument::Definite(source.read_uint_be(2)?),
        AI_FOUR_BYTES => Argument::Definite(source.read_uint_be(4)?),
        AI_EIGHT_BYTES => Argument::Definite(source.read_uint_be(8)?),
        AI_INDEFINITE => Argument::Indefinite,
        _ => return Err(Error::InvalidAdditionalInfo(ai, major_type)),
    };
    Ok(Head { major_type, ai, argument })
}

/// Peek the next byte and report whether it is the break marker, without consuming anything.
pub fn peek_is_break<S: ByteSource>(source: &mut S) -> Result<bool> {
    Ok(source.peek_byte()? == BREAK)
}
