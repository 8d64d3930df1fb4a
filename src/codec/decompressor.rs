//! Pooled gzip decompressor.

use std::fmt;

use flate2::{Decompress, FlushDecompress, Status};

use super::header::{self, Trailer, TRAILER_LEN};
use super::reserve_output;
use crate::error::CodecError;
use crate::pool::Poolable;

/// An inflate engine that decodes gzip streams into a sink.
///
/// Concatenated members are decoded in order and their output is appended;
/// the engine is reset at the start of each member.
pub(crate) struct Decompressor {
    inflate: Decompress,
}

impl Decompressor {
    pub(crate) fn new() -> Self {
        Self {
            inflate: Decompress::new(false),
        }
    }

    /// Decodes every member of `input`, appending the output to `sink`.
    ///
    /// On error `sink` may hold the output of earlier members.
    pub(crate) fn decompress(&mut self, input: &[u8], sink: &mut Vec<u8>) -> Result<(), CodecError> {
        let mut rest = input;
        loop {
            let header_len = header::parse_header(rest)?;
            rest = &rest[header_len..];

            let start = sink.len();
            let body_len = self.inflate_member(rest, sink)?;
            rest = &rest[body_len..];

            Trailer::parse(rest)?.verify(&sink[start..])?;
            rest = &rest[TRAILER_LEN..];

            if rest.is_empty() {
                return Ok(());
            }
        }
    }

    /// Inflates one deflate body and returns how many input bytes it spanned.
    fn inflate_member(&mut self, body: &[u8], sink: &mut Vec<u8>) -> Result<usize, CodecError> {
        self.inflate.reset(false);
        let base_in = self.inflate.total_in();

        loop {
            reserve_output(sink);
            let (before_in, before_out) = (self.inflate.total_in(), self.inflate.total_out());
            let consumed = (before_in - base_in) as usize;

            let status =
                self.inflate
                    .decompress_vec(&body[consumed..], sink, FlushDecompress::None)?;

            match status {
                Status::StreamEnd => return Ok((self.inflate.total_in() - base_in) as usize),
                Status::Ok | Status::BufError => {
                    // Output space was available, so no progress means no more input
                    if self.inflate.total_in() == before_in && self.inflate.total_out() == before_out
                    {
                        return Err(CodecError::Truncated);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Decompressor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decompressor")
            .field("total_in", &self.inflate.total_in())
            .field("total_out", &self.inflate.total_out())
            .finish()
    }
}

impl Poolable for Decompressor {
    type Policy = ();

    fn create(_: &()) -> Self {
        Self::new()
    }

    fn recycle(&mut self, _: &()) -> bool {
        true
    }
}
