//! The codec pool manager - `CodecPool` with `zip()`/`unzip()`.
//!
//! Each call borrows one scratch buffer and one codec instance, runs the
//! codec, copies the result out, and hands both back to their pools. The
//! borrows are scope guards, so release happens on success, on `?` early
//! returns and while unwinding.
//!
//! # Example
//!
//! ```
//! use gzpool::CodecPool;
//!
//! let pool = CodecPool::default();
//!
//! let compressed = pool.zip(b"hello world")?;
//! let restored = pool.unzip(&compressed)?;
//! assert_eq!(&restored[..], b"hello world");
//! # Ok::<(), gzpool::CodecError>(())
//! ```

use bytes::Bytes;

use crate::buffer::ScratchBuffer;
use crate::codec::{Compressor, Decompressor};
use crate::config::PoolConfig;
use crate::error::CodecError;
use crate::pool::{Pool, PoolStats};

/// Pools of compressors, decompressors and scratch buffers.
///
/// `CodecPool` is `Send + Sync`; share it by reference or behind an `Arc`.
/// Concurrent calls never observe each other's instances: a borrowed
/// instance belongs to exactly one call until that call returns.
///
/// Pools grow to the peak number of concurrent calls and never block. Codec
/// instances are kept forever; a scratch buffer is dropped on release if its
/// capacity exceeds [`PoolConfig::max_buffer_capacity`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use gzpool::{CodecPool, PoolConfig};
///
/// let pool = Arc::new(CodecPool::new(PoolConfig::new(128 * 1024)?)?);
///
/// let handles: Vec<_> = (0..4)
///     .map(|i| {
///         let pool = Arc::clone(&pool);
///         thread::spawn(move || {
///             let payload = format!("payload {i}").into_bytes();
///             let compressed = pool.zip(&payload)?;
///             let restored = pool.unzip(&compressed)?;
///             assert_eq!(restored, payload);
///             Ok::<(), gzpool::CodecError>(())
///         })
///     })
///     .collect();
///
/// for handle in handles {
///     handle.join().unwrap()?;
/// }
/// # Ok::<(), gzpool::CodecError>(())
/// ```
#[derive(Debug)]
pub struct CodecPool {
    config: PoolConfig,
    buffers: Pool<ScratchBuffer>,
    compressors: Pool<Compressor>,
    decompressors: Pool<Decompressor>,
}

impl CodecPool {
    /// Creates empty pools with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: PoolConfig) -> Result<Self, CodecError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PoolConfig) -> Self {
        Self {
            config,
            buffers: Pool::new("buffers", config),
            compressors: Pool::new("compressors", ()),
            decompressors: Pool::new("decompressors", ()),
        }
    }

    /// Compresses `input` into a standard gzip stream.
    ///
    /// Empty input still yields a complete gzip member of about 20 bytes.
    ///
    /// # Errors
    ///
    /// [`CodecError::Write`] or [`CodecError::Finish`] if the deflate engine
    /// fails. Pooled resources are released either way.
    pub fn zip(&self, input: &[u8]) -> Result<Bytes, CodecError> {
        let mut buf = self.buffers.acquire();
        let mut compressor = self.compressors.acquire();

        compressor.compress(input, buf.as_vec_mut())?;

        // Copy out: `buf` goes back to the pool when this scope ends
        Ok(Bytes::copy_from_slice(buf.as_slice()))
    }

    /// Decompresses a gzip stream.
    ///
    /// Concatenated members are decoded in order and joined.
    ///
    /// # Errors
    ///
    /// A format error (see [`CodecError::is_format_error`]) if `input` is not
    /// a valid gzip stream. No partial output is returned.
    pub fn unzip(&self, input: &[u8]) -> Result<Bytes, CodecError> {
        let mut buf = self.buffers.acquire();
        let mut decompressor = self.decompressors.acquire();

        decompressor.decompress(input, buf.as_vec_mut())?;

        Ok(Bytes::copy_from_slice(buf.as_slice()))
    }

    /// Returns the configuration these pools were built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Get per-pool statistics.
    pub fn stats(&self) -> CodecPoolStats {
        CodecPoolStats {
            buffers: self.buffers.stats(),
            compressors: self.compressors.stats(),
            decompressors: self.decompressors.stats(),
        }
    }
}

impl Default for CodecPool {
    fn default() -> Self {
        Self::with_valid_config(PoolConfig::default())
    }
}

/// Statistics for the three pools of a [`CodecPool`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecPoolStats {
    /// Scratch buffer pool.
    pub buffers: PoolStats,
    /// Compressor pool.
    pub compressors: PoolStats,
    /// Decompressor pool.
    pub decompressors: PoolStats,
}
