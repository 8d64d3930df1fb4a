//! Process-wide default pool and free-function shortcuts.

use std::sync::OnceLock;

use bytes::Bytes;

use super::CodecPool;
use crate::error::CodecError;

static DEFAULT_POOL: OnceLock<CodecPool> = OnceLock::new();

/// Get the process-wide pool used by [`zip`] and [`unzip`].
///
/// Built on first use with [`PoolConfig::default`](crate::PoolConfig::default).
/// Code that needs isolated statistics or a different threshold should own
/// a [`CodecPool`] instead.
pub fn default_pool() -> &'static CodecPool {
    DEFAULT_POOL.get_or_init(CodecPool::default)
}

/// Compresses `input` with the [`default_pool`].
///
/// # Example
///
/// ```
/// let compressed = gzpool::zip(b"hello world")?;
/// assert_eq!(&compressed[..2], &[0x1f, 0x8b]);
/// # Ok::<(), gzpool::CodecError>(())
/// ```
pub fn zip(input: &[u8]) -> Result<Bytes, CodecError> {
    default_pool().zip(input)
}

/// Decompresses `input` with the [`default_pool`].
///
/// # Example
///
/// ```
/// assert!(gzpool::unzip(&[0x00, 0x01, 0x02]).is_err());
/// ```
pub fn unzip(input: &[u8]) -> Result<Bytes, CodecError> {
    default_pool().unzip(input)
}
