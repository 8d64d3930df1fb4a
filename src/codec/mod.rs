//! gzip codec instances driven over `flate2`'s raw deflate engines.
//!
//! - [`Compressor`] - Writes one gzip member into a sink
//! - [`Decompressor`] - Decodes a (possibly multi-member) gzip stream
//!
//! Both wrap state that is expensive to allocate and cheap to reset, which is
//! what makes them worth pooling.

mod compressor;
mod decompressor;
mod header;

pub(crate) use compressor::Compressor;
pub(crate) use decompressor::Decompressor;

/// Spare capacity guaranteed before each call into a deflate engine.
const OUTPUT_RESERVE: usize = 4 * 1024;

/// Makes sure the engine has room to write into `sink`'s spare capacity.
#[inline]
fn reserve_output(sink: &mut Vec<u8>) {
    if sink.capacity() - sink.len() < OUTPUT_RESERVE {
        sink.reserve(OUTPUT_RESERVE);
    }
}
