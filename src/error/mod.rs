//! Error types for gzpool.

use std::fmt;

/// Errors that can occur while compressing or decompressing.
#[derive(Debug)]
pub enum CodecError {
    /// The deflate engine rejected input while it was being written.
    Write(flate2::CompressError),

    /// The deflate engine failed to flush and close the stream.
    Finish(flate2::CompressError),

    /// The gzip header is malformed or uses an unsupported method.
    InvalidHeader {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The stream ended before the header, body or trailer was complete.
    Truncated,

    /// The deflate body is corrupt.
    Corrupt(flate2::DecompressError),

    /// The CRC-32 in the trailer does not match the decoded data.
    ChecksumMismatch {
        /// Checksum recorded in the trailer.
        expected: u32,
        /// Checksum of the decoded bytes.
        actual: u32,
    },

    /// The ISIZE field in the trailer does not match the decoded length.
    LengthMismatch {
        /// Length (mod 2^32) recorded in the trailer.
        expected: u32,
        /// Length (mod 2^32) of the decoded bytes.
        actual: u32,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl CodecError {
    /// Returns `true` if the error means the input was not a valid gzip stream.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            CodecError::InvalidHeader { .. }
                | CodecError::Truncated
                | CodecError::Corrupt(_)
                | CodecError::ChecksumMismatch { .. }
                | CodecError::LengthMismatch { .. }
        )
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Write(e) => write!(f, "write error: {}", e),
            CodecError::Finish(e) => write!(f, "finish error: {}", e),
            CodecError::InvalidHeader { message } => write!(f, "invalid gzip header: {}", message),
            CodecError::Truncated => write!(f, "unexpected end of gzip stream"),
            CodecError::Corrupt(e) => write!(f, "corrupt deflate data: {}", e),
            CodecError::ChecksumMismatch { expected, actual } => {
                write!(
                    f,
                    "checksum mismatch: trailer {:#010x}, data {:#010x}",
                    expected, actual
                )
            }
            CodecError::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: trailer {}, data {}", expected, actual)
            }
            CodecError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Write(e) | CodecError::Finish(e) => Some(e),
            CodecError::Corrupt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<flate2::DecompressError> for CodecError {
    fn from(e: flate2::DecompressError) -> Self {
        CodecError::Corrupt(e)
    }
}
