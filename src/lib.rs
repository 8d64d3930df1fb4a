//! gzpool
//!
//! Pooled gzip compression for Rust.
//!
//! `gzpool` compresses and decompresses byte payloads in the standard gzip
//! format. It is built for call sites that do this many times per second:
//!
//! - RPC and cache payloads
//! - message queue bodies
//! - HTTP response bodies built in memory
//!
//! Deflate/inflate engines and scratch buffers are expensive to allocate, so
//! they are pooled and reset between calls instead of rebuilt each time.
//!
//! The crate intentionally:
//! - does NOT stream
//! - does NOT expose compression levels
//! - does NOT define a format of its own
//!
//! It only does one thing: **bytes → gzip → bytes**
//!
//! # Example
//!
//! ```
//! use gzpool::{CodecPool, PoolConfig};
//!
//! let pool = CodecPool::new(PoolConfig::default())?;
//!
//! let compressed = pool.zip(b"hello world")?;
//! let restored = pool.unzip(&compressed)?;
//! assert_eq!(&restored[..], b"hello world");
//!
//! // Or use the process-wide pool
//! let compressed = gzpool::zip(b"hello world")?;
//! assert_eq!(&gzpool::unzip(&compressed)?[..], b"hello world");
//! # Ok::<(), gzpool::CodecError>(())
//! ```
//!
//! # Memory
//!
//! Scratch buffers grow with the payloads that pass through them. A buffer
//! whose capacity exceeds [`PoolConfig::max_buffer_capacity`] (64 KiB by
//! default) is dropped when released, so one large payload does not pin
//! memory in the pool.
//!
//! # Logging (feature = "logging")
//!
//! Pool misses and discarded buffers are reported as `tracing` events.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod manager;

mod buffer; // internal (pooled scratch memory)
mod codec; // internal gzip over flate2
mod pool; // internal lock-free pools

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_INITIAL_BUFFER_CAPACITY, DEFAULT_MAX_BUFFER_CAPACITY, PoolConfig};
pub use error::CodecError;
pub use manager::{CodecPool, CodecPoolStats, default_pool, unzip, zip};
pub use pool::PoolStats;
