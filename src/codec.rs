//! `Encoder<S>` / `Decoder<S>` — the substrate-agnostic entry points (C3's home) that own a
//! [`Config`], a [`DepthGauge`], and the attached substrate.

use std::rc::Rc;

use crate::config::Config;
use crate::depth::DepthGauge;
use crate::io::{ByteSink, ByteSource, SliceSource};
use crate::result::Result;
use crate::value::{Decode, Encode};

/// Wraps a [`ByteSink`] substrate with the configuration and depth bookkeeping shared by every
/// `Encode` impl.
#[derive(Debug)]
pub struct Encoder<S> {
    sink: S,
    config: Config,
    depth: Rc<DepthGauge>,
}

impl<S: ByteSink> Encoder<S> {
    /// Attach `sink` with the given configuration.
    pub fn new(sink: S, config: Config) -> Self {
        let depth = Rc::new(DepthGauge::new(*config.max_depth()));
        Self { sink, config, depth }
    }

    /// The configuration this instance was constructed with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying sink. Exposed so `Encode` impls outside this module — including ones
    /// generated by [`crate::cbor_record!`] in a downstream crate — can reach the byte layer.
    pub fn sink(&mut self) -> &mut S {
        &mut self.sink
    }

    /// A cheap handle to the shared depth gauge, independent of any borrow of `self` — lets a
    /// composite `Encode` impl hold a `DepthGuard` across recursive calls that also need `&mut
    /// self` for the sink.
    pub fn depth(&self) -> Rc<DepthGauge> {
        Rc::clone(&self.depth)
    }

    /// Emit a single complete item for `value`.
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.encode(self)
    }

    /// Flush any staged bytes and return the underlying substrate.
    pub fn finish(mut self) -> Result<S> {
        self.sink.finish()?;
        Ok(self.sink)
    }
}

/// Wraps a [`ByteSource`] substrate with the configuration and depth bookkeeping shared by every
/// `Decode` impl.
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
    config: Config,
    depth: Rc<DepthGauge>,
}

impl<S: ByteSource> Decoder<S> {
    /// Attach `source` with the given configuration.
    pub fn new(source: S, config: Config) -> Self {
        let depth = Rc::new(DepthGauge::new(*config.max_depth()));
        Self { source, config, depth }
    }

    /// The configuration this instance was constructed with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The underlying source. Exposed so `Decode` impls outside this module — including ones
    /// generated by [`crate::cbor_record!`] in a downstream crate — can reach the byte layer.
    pub fn source(&mut self) -> &mut S {
        &mut self.source
    }

    /// A cheap handle to the shared depth gauge, independent of any borrow of `self`.
    pub fn depth(&self) -> Rc<DepthGauge> {
        Rc::clone(&self.depth)
    }

    /// Consume a single complete item and return it as `T`.
    pub fn decode<T: Decode>(&mut self) -> Result<T> {
        T::decode(self)
    }

    /// Consume one item, discarding it.
    pub fn skip(&mut self) -> Result<()> {
        let depth = self.depth();
        crate::walk::skip(&mut self.source, &depth)
    }

    /// Traverse a map, returning the value for `key`, or `None` if no entry matches.
    pub fn extract_field<T: Decode>(&mut self, key: &str) -> Result<Option<T>> {
        crate::walk::extract_field(self, key)
    }
}

impl<'b> Decoder<SliceSource<'b>> {
    /// Zero-copy decode of a text string, aliasing the original input for as long as `'b`.
    ///
    /// Only available on the slice-backed decoder: the stream substrate has no backing buffer
    /// to alias into, so it always copies.
    pub fn decode_str_ref(&mut self) -> Result<&'b str> {
        crate::value::decode_text_span(self)
    }

    /// Zero-copy decode of a byte string, aliasing the original input for as long as `'b`.
    pub fn decode_bytes_ref(&mut self) -> Result<&'b [u8]> {
        crate::value::decode_byte_span(self)
    }

    /// Current byte offset into the original slice.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Move the position to an arbitrary offset within the slice.
    pub fn set_position(&mut self, pos: usize) {
        self.source.set_position(pos)
    }
}
