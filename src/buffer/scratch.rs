//! Reusable scratch buffer with a retention cap.

use crate::config::PoolConfig;
use crate::pool::Poolable;

/// A reusable byte buffer.
///
/// Serves as the gzip sink while compressing and as the decode staging area
/// while decompressing. Its bytes never leave the crate; callers receive a
/// copy.
#[derive(Debug)]
pub(crate) struct ScratchBuffer {
    data: Vec<u8>,
}

impl ScratchBuffer {
    /// Creates an empty buffer with the given capacity.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Gives a codec direct access to the underlying vector.
    #[inline]
    pub(crate) fn as_vec_mut(&mut self) -> &mut Vec<u8> {
        &mut self.data
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Clears the buffer without deallocating.
    pub(crate) fn clear(&mut self) {
        self.data.clear();
    }
}

impl Poolable for ScratchBuffer {
    type Policy = PoolConfig;

    fn create(config: &PoolConfig) -> Self {
        Self::with_capacity(config.initial_buffer_capacity())
    }

    fn recycle(&mut self, config: &PoolConfig) -> bool {
        if self.capacity() > config.max_buffer_capacity() {
            return false;
        }
        self.clear();
        true
    }

    fn retained_bytes(&self) -> usize {
        self.capacity()
    }
}
