//! Constructor-time configuration consumed by [`crate::codec::Encoder`]/[`crate::codec::Decoder`].

use derive_getters::Getters;

/// Limits and feature toggles applied for the lifetime of an encoder or decoder instance.
///
/// Built with [`Config::default`] and refined through the chained `with_*` builders, in the
/// idiom of this codebase's other builder-style configuration structs.
#[derive(Debug, Clone, Getters)]
pub struct Config {
    max_string_length: usize,
    max_collection_size: usize,
    max_depth: usize,
    stream_buffer_size: usize,
    enable_indefinite_length: bool,
    validate_utf8: bool,
    use_simd: bool,
    allow_duplicate_keys: bool,
}

impl Config {
    /// Byte length beyond which a text or byte string is rejected.
    pub fn with_max_string_length(mut self, v: usize) -> Self {
        self.max_string_length = v;
        self
    }

    /// Element count beyond which an array or map is rejected.
    pub fn with_max_collection_size(mut self, v: usize) -> Self {
        self.max_collection_size = v;
        self
    }

    /// Nesting depth beyond which encode/decode fails with `DepthExceeded`.
    pub fn with_max_depth(mut self, v: usize) -> Self {
        self.max_depth = v;
        self
    }

    /// Capacity of the refill/stage buffer used by a stream substrate.
    pub fn with_stream_buffer_size(mut self, v: usize) -> Self {
        self.stream_buffer_size = v;
        self
    }

    /// When `false`, indefinite-length items are refused on both encode and decode.
    pub fn with_enable_indefinite_length(mut self, v: bool) -> Self {
        self.enable_indefinite_length = v;
        self
    }

    /// Accepted for forward compatibility with a future accelerated-validation path. Decoding
    /// into `String`/`&str` always validates UTF-8 regardless of this flag — the wire bytes are
    /// not trusted input, so there is no sound way to skip that check for those types. A caller
    /// that wants the raw, unvalidated payload should decode a `ByteBuf` instead.
    pub fn with_validate_utf8(mut self, v: bool) -> Self {
        self.validate_utf8 = v;
        self
    }

    /// Advisory only: selects accelerated validate/copy primitives where available. This core
    /// ships only the portable fallback, so the flag is accepted but never changes behavior.
    pub fn with_use_simd(mut self, v: bool) -> Self {
        self.use_simd = v;
        self
    }

    /// When `false`, a repeated key in a decoded map fails with `MalformedInput` instead of
    /// letting the last occurrence win.
    pub fn with_allow_duplicate_keys(mut self, v: bool) -> Self {
        self.allow_duplicate_keys = v;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_string_length: 1 << 20,
            max_collection_size: 1 << 16,
            max_depth: 64,
            stream_buffer_size: 4096,
            enable_indefinite_length: true,
            validate_utf8: true,
            use_simd: false,
            allow_duplicate_keys: true,
        }
    }
}
