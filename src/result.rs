//! Crate-wide error taxonomy and `Result` alias.

use thiserror::Error;

/// Crate-wide result alias; defaults the error type to [`Error`].
pub type Result<A, E = Error> = std::result::Result<A, E>;

/// A single flat error enum covering every failure kind the codec can raise.
///
/// Every parse or emit primitive returns an `Error` rather than recovering locally; composite
/// operations propagate it with `?` and leave the originating instance's position indeterminate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("buffer overflow: attempted to write past the end of a fixed buffer")]
    BufferOverflow,
    #[error("buffer underflow: attempted to read past the end of input")]
    BufferUnderflow,
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("type mismatch: {0}")]
    TypeMismatch(&'static str),
    #[error("invalid length: {0}")]
    InvalidLength(&'static str),
    #[error("invalid additional info {0:#04x} for major type {1}")]
    InvalidAdditionalInfo(u8, u8),
    #[error("invalid float: additional info does not match the requested width")]
    InvalidFloat,
    #[error("invalid bool: major type 7 additional info was not 20 or 21")]
    InvalidBool,
    #[error("invalid UTF-8 in text string: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("invalid UTF-8 in text string")]
    InvalidUtf8Owned(#[from] std::string::FromUtf8Error),
    #[error("indefinite-length item disallowed or used on an inapplicable major type")]
    InvalidIndefiniteLength,
    #[error("break marker observed outside any indefinite-length frame")]
    InvalidBreakCode,
    #[error("indefinite-length frame closed without a break marker")]
    MissingBreakMarker,
    #[error("decoded integer does not fit the requested width")]
    IntegerOverflow,
    #[error("negative integer (major type 1) requested into an unsigned type")]
    NegativeIntegerForUnsigned,
    #[error("nesting depth exceeded the configured maximum")]
    DepthExceeded,
    #[error("required field {0:?} was absent from the decoded map")]
    MissingRequiredField(&'static str),
    #[error("operation disabled by configuration: {0}")]
    UnsupportedValue(&'static str),
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),
    #[error("allocation failed while decoding a dynamic-length sequence")]
    OutOfMemory,
}
