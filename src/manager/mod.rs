//! Codec pool manager.
//!
//! - [`CodecPool`] - Owns the pools and exposes `zip()`/`unzip()`
//! - [`zip`]/[`unzip`] - Shortcuts over a lazily built process-wide pool

mod engine;
mod global;

pub use engine::{CodecPool, CodecPoolStats};
pub use global::{default_pool, unzip, zip};
