//! gzip member framing (RFC 1952).
//!
//! A member is a header, a raw deflate body and an 8-byte trailer holding the
//! CRC-32 and the length (mod 2^32) of the uncompressed data.

use crate::error::CodecError;

const ID1: u8 = 0x1f;
const ID2: u8 = 0x8b;
const CM_DEFLATE: u8 = 8;

const FHCRC: u8 = 1 << 1;
const FEXTRA: u8 = 1 << 2;
const FNAME: u8 = 1 << 3;
const FCOMMENT: u8 = 1 << 4;
const FRESERVED: u8 = 0xe0;

/// Operating system "unknown".
const OS_UNKNOWN: u8 = 255;

/// Length of the fixed header we write.
pub(crate) const HEADER_LEN: usize = 10;

/// Length of the member trailer.
pub(crate) const TRAILER_LEN: usize = 8;

/// Appends a minimal header: no optional fields, no mtime.
pub(crate) fn write_header(out: &mut Vec<u8>) {
    out.extend_from_slice(&[
        ID1,
        ID2,
        CM_DEFLATE,
        0, // flags
        0,
        0,
        0,
        0, // mtime
        0, // xfl
        OS_UNKNOWN,
    ]);
}

/// Appends the trailer for `data_crc` over `data_len` uncompressed bytes.
pub(crate) fn write_trailer(out: &mut Vec<u8>, data_crc: u32, data_len: usize) {
    out.extend_from_slice(&data_crc.to_le_bytes());
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
}

/// Parses a member header and returns its length in bytes.
///
/// Optional fields are skipped. FHCRC, when present, is verified.
pub(crate) fn parse_header(input: &[u8]) -> Result<usize, CodecError> {
    // Reject foreign data early, even when it is shorter than a header
    let magic_len = input.len().min(2);
    if input[..magic_len] != [ID1, ID2][..magic_len] {
        return Err(CodecError::InvalidHeader {
            message: "bad magic number",
        });
    }

    let mut cursor = Cursor::new(input);
    let fixed = cursor.take(HEADER_LEN)?;

    if fixed[2] != CM_DEFLATE {
        return Err(CodecError::InvalidHeader {
            message: "unsupported compression method",
        });
    }

    let flags = fixed[3];
    if flags & FRESERVED != 0 {
        return Err(CodecError::InvalidHeader {
            message: "reserved flag bits set",
        });
    }

    if flags & FEXTRA != 0 {
        let xlen = u16::from_le_bytes(cursor.take_array()?);
        cursor.take(usize::from(xlen))?;
    }

    if flags & FNAME != 0 {
        cursor.skip_zero_terminated()?;
    }

    if flags & FCOMMENT != 0 {
        cursor.skip_zero_terminated()?;
    }

    if flags & FHCRC != 0 {
        let covered = cursor.pos;
        let expected = u16::from_le_bytes(cursor.take_array()?);
        let actual = crc32fast::hash(&input[..covered]) as u16;
        if expected != actual {
            return Err(CodecError::InvalidHeader {
                message: "header checksum mismatch",
            });
        }
    }

    Ok(cursor.pos)
}

/// The CRC-32 and ISIZE recorded at the end of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Trailer {
    pub(crate) crc: u32,
    pub(crate) size: u32,
}

impl Trailer {
    /// Reads a trailer from the start of `input`.
    pub(crate) fn parse(input: &[u8]) -> Result<Self, CodecError> {
        let mut cursor = Cursor::new(input);
        let crc = u32::from_le_bytes(cursor.take_array()?);
        let size = u32::from_le_bytes(cursor.take_array()?);
        Ok(Self { crc, size })
    }

    /// Checks the trailer against the bytes decoded from its member.
    pub(crate) fn verify(&self, decoded: &[u8]) -> Result<(), CodecError> {
        let actual = crc32fast::hash(decoded);
        if actual != self.crc {
            return Err(CodecError::ChecksumMismatch {
                expected: self.crc,
                actual,
            });
        }

        let actual = decoded.len() as u32;
        if actual != self.size {
            return Err(CodecError::LengthMismatch {
                expected: self.size,
                actual,
            });
        }

        Ok(())
    }
}

/// Forward-only reader over a byte slice; running short is `Truncated`.
struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(n).ok_or(CodecError::Truncated)?;
        let bytes = self.buf.get(self.pos..end).ok_or(CodecError::Truncated)?;
        self.pos = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        self.take(N)?
            .try_into()
            .map_err(|_| CodecError::Truncated)
    }

    fn skip_zero_terminated(&mut self) -> Result<(), CodecError> {
        let rest = &self.buf[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(CodecError::Truncated)?;
        self.pos += nul + 1;
        Ok(())
    }
}
