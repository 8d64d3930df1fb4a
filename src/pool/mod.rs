//! Instance pooling for codec state and scratch memory.
//!
//! Pools are unbounded and lock-free. They only bound what an individual
//! instance may keep alive while idle; the number of idle instances follows
//! the peak concurrency of the callers.

mod shared;

pub(crate) use shared::{Pool, Poolable};
pub use shared::PoolStats;
