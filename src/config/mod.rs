//! Configuration for pool retention behavior.
//!
//! - [`PoolConfig`] - Scratch buffer sizing and retention threshold
//!
//! # Example
//!
//! ```
//! use gzpool::PoolConfig;
//!
//! // Retain buffers up to 256 KiB
//! let config = PoolConfig::new(256 * 1024)?;
//!
//! // Start fresh buffers larger
//! let config = PoolConfig::default().with_initial_buffer_capacity(16 * 1024);
//!
//! # Ok::<(), gzpool::CodecError>(())
//! ```

use crate::error::CodecError;

/// Default retention threshold for pooled scratch buffers (64 KiB).
pub const DEFAULT_MAX_BUFFER_CAPACITY: usize = 64 * 1024;

/// Default capacity of a freshly constructed scratch buffer (4 KiB).
pub const DEFAULT_INITIAL_BUFFER_CAPACITY: usize = 4 * 1024;

/// Configuration for a [`CodecPool`](crate::CodecPool).
///
/// A scratch buffer grows to fit whatever passes through it. When it is
/// released with a capacity above `max_buffer_capacity` it is dropped instead
/// of pooled, which bounds the memory the pool holds between calls.
///
/// Codec instances carry fixed-size state and are never size-checked.
///
/// # Constraints
///
/// - `max_buffer_capacity` must be non-zero
/// - `initial_buffer_capacity <= max_buffer_capacity`
///
/// # Example
///
/// ```
/// use gzpool::PoolConfig;
///
/// let config = PoolConfig::default()
///     .with_max_buffer_capacity(128 * 1024)
///     .with_initial_buffer_capacity(8 * 1024);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_buffer_capacity(), 128 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolConfig {
    /// Largest capacity a released buffer may have and still be pooled.
    max_buffer_capacity: usize,

    /// Capacity reserved when a buffer is constructed on a pool miss.
    initial_buffer_capacity: usize,
}

impl PoolConfig {
    /// Creates a new configuration with the given retention threshold.
    ///
    /// The initial buffer capacity is the smaller of the default and
    /// `max_buffer_capacity`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidConfig`] if `max_buffer_capacity` is zero.
    pub fn new(max_buffer_capacity: usize) -> Result<Self, CodecError> {
        let config = Self {
            max_buffer_capacity,
            initial_buffer_capacity: DEFAULT_INITIAL_BUFFER_CAPACITY.min(max_buffer_capacity),
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the retention threshold.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_max_buffer_capacity(mut self, capacity: usize) -> Self {
        self.max_buffer_capacity = capacity;
        self
    }

    /// Sets the capacity of freshly constructed buffers.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`PoolConfig::validate`] to check it.
    pub fn with_initial_buffer_capacity(mut self, capacity: usize) -> Self {
        self.initial_buffer_capacity = capacity;
        self
    }

    /// Returns the retention threshold.
    pub fn max_buffer_capacity(&self) -> usize {
        self.max_buffer_capacity
    }

    /// Returns the capacity of freshly constructed buffers.
    pub fn initial_buffer_capacity(&self) -> usize {
        self.initial_buffer_capacity
    }

    /// Validates the current configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use gzpool::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_max_buffer_capacity(0);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.max_buffer_capacity == 0 {
            return Err(CodecError::InvalidConfig {
                message: "max_buffer_capacity must be non-zero",
            });
        }

        if self.initial_buffer_capacity > self.max_buffer_capacity {
            return Err(CodecError::InvalidConfig {
                message: "initial_buffer_capacity cannot be greater than max_buffer_capacity",
            });
        }

        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_buffer_capacity: DEFAULT_MAX_BUFFER_CAPACITY,
            initial_buffer_capacity: DEFAULT_INITIAL_BUFFER_CAPACITY,
        }
    }
}
