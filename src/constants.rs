//! Wire-format constants: major type values, additional-info thresholds, and simple values.

/// Major type 0: unsigned integer.
pub const MT_UINT: u8 = 0;
/// Major type 1: negative integer.
pub const MT_NINT: u8 = 1;
/// Major type 2: byte string.
pub const MT_BSTR: u8 = 2;
/// Major type 3: text string.
pub const MT_TSTR: u8 = 3;
/// Major type 4: array.
pub const MT_ARRAY: u8 = 4;
/// Major type 5: map.
pub const MT_MAP: u8 = 5;
/// Major type 6: tag (skip-only in this core).
pub const MT_TAG: u8 = 6;
/// Major type 7: float or simple value.
pub const MT_SIMPLE: u8 = 7;

/// Low 5 bits of an initial byte.
pub const AI_MASK: u8 = 0b0001_1111;
/// High 3 bits of an initial byte, pre-shifted.
pub const MT_SHIFT: u32 = 5;

/// Largest additional-info value carried inline (no extra bytes).
pub const AI_MAX_INLINE: u8 = 23;
/// Additional info: argument is the following 1 byte.
pub const AI_ONE_BYTE: u8 = 24;
/// Additional info: argument is the following 2 bytes, big-endian.
pub const AI_TWO_BYTES: u8 = 25;
/// Additional info: argument is the following 4 bytes, big-endian.
pub const AI_FOUR_BYTES: u8 = 26;
/// Additional info: argument is the following 8 bytes, big-endian.
pub const AI_EIGHT_BYTES: u8 = 27;
/// Additional info: indefinite length (valid only for MT 2/3/4/5).
pub const AI_INDEFINITE: u8 = 31;

/// Simple value: boolean false (MT 7, AI 20).
pub const SIMPLE_FALSE: u8 = 20;
/// Simple value: boolean true (MT 7, AI 21).
pub const SIMPLE_TRUE: u8 = 21;
/// Simple value: null (MT 7, AI 22).
pub const SIMPLE_NULL: u8 = 22;
/// Simple value: undefined (MT 7, AI 23); never produced by `encode`.
pub const SIMPLE_UNDEFINED: u8 = 23;
/// Float width selector: half precision (16 bits).
pub const FLOAT_HALF: u8 = 25;
/// Float width selector: single precision (32 bits).
pub const FLOAT_SINGLE: u8 = 26;
/// Float width selector: double precision (64 bits).
pub const FLOAT_DOUBLE: u8 = 27;

/// The break marker byte (MT 7, AI 31) terminating an indefinite-length item.
pub const BREAK: u8 = 0xFF;

/// The single-byte encoding of the null value (MT 7, AI 22): `(7 << 5) | 22`.
pub const NULL_BYTE: u8 = (MT_SIMPLE << MT_SHIFT) | SIMPLE_NULL;
