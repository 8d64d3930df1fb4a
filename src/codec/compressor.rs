//! Pooled gzip compressor.

use std::fmt;

use flate2::{Compress, Compression, FlushCompress, Status};

use super::header;
use super::reserve_output;
use crate::error::CodecError;
use crate::pool::Poolable;

/// A deflate engine that writes complete gzip members into a sink.
///
/// The engine allocates its window and hash tables once; `compress` resets it
/// before every use so no state crosses from one call into the next.
pub(crate) struct Compressor {
    deflate: Compress,
}

impl Compressor {
    pub(crate) fn new() -> Self {
        Self {
            deflate: Compress::new(Compression::default(), false),
        }
    }

    /// Compresses `input` into `sink` as one gzip member.
    ///
    /// Bytes are appended; on error `sink` may hold a partial member.
    pub(crate) fn compress(&mut self, input: &[u8], sink: &mut Vec<u8>) -> Result<(), CodecError> {
        self.deflate.reset();
        header::write_header(sink);
        self.write(input, sink)?;
        self.finish(sink)?;
        header::write_trailer(sink, crc32fast::hash(input), input.len());
        Ok(())
    }

    fn write(&mut self, mut input: &[u8], sink: &mut Vec<u8>) -> Result<(), CodecError> {
        while !input.is_empty() {
            reserve_output(sink);
            let before = self.deflate.total_in();
            self.deflate
                .compress_vec(input, sink, FlushCompress::None)
                .map_err(CodecError::Write)?;
            let consumed = (self.deflate.total_in() - before) as usize;
            input = &input[consumed..];
        }
        Ok(())
    }

    /// Flushes pending output and closes the deflate stream.
    fn finish(&mut self, sink: &mut Vec<u8>) -> Result<(), CodecError> {
        loop {
            reserve_output(sink);
            let status = self
                .deflate
                .compress_vec(&[], sink, FlushCompress::Finish)
                .map_err(CodecError::Finish)?;
            if matches!(status, Status::StreamEnd) {
                return Ok(());
            }
        }
    }
}

impl fmt::Debug for Compressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compressor")
            .field("total_in", &self.deflate.total_in())
            .field("total_out", &self.deflate.total_out())
            .finish()
    }
}

impl Poolable for Compressor {
    type Policy = ();

    fn create(_: &()) -> Self {
        Self::new()
    }

    fn recycle(&mut self, _: &()) -> bool {
        true
    }
}
