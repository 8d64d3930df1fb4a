//! Lock-free pool of reusable instances with an RAII borrow guard.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::queue::SegQueue;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

/// A value that can live in a [`Pool`].
pub(crate) trait Poolable: Sized {
    /// Settings shared by every instance in one pool.
    type Policy: Send + Sync;

    /// Builds a fresh instance on a pool miss.
    fn create(policy: &Self::Policy) -> Self;

    /// Prepares a released instance for reuse.
    ///
    /// Returns `false` if the instance must be dropped instead of pooled.
    fn recycle(&mut self, policy: &Self::Policy) -> bool;

    /// Heap bytes this instance keeps alive while idle.
    fn retained_bytes(&self) -> usize {
        0
    }
}

/// Unbounded, unordered pool of idle instances.
///
/// Any number of threads may acquire and release concurrently. An instance
/// is owned by exactly one [`Pooled`] guard while borrowed.
pub(crate) struct Pool<T: Poolable> {
    name: &'static str,
    policy: T::Policy,
    idle: SegQueue<T>,
    retained: AtomicUsize,
    /// Statistics: instances handed out from the idle set.
    hits: AtomicUsize,
    /// Statistics: instances constructed on a miss.
    misses: AtomicUsize,
    /// Statistics: instances put back after use.
    returns: AtomicUsize,
    /// Statistics: instances dropped by the recycle policy.
    discards: AtomicUsize,
}

impl<T: Poolable> Pool<T> {
    /// Creates an empty pool. `name` labels log events.
    pub(crate) fn new(name: &'static str, policy: T::Policy) -> Self {
        Self {
            name,
            policy,
            idle: SegQueue::new(),
            retained: AtomicUsize::new(0),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
            discards: AtomicUsize::new(0),
        }
    }

    /// Borrows an idle instance, or constructs one if none is available.
    #[inline]
    pub(crate) fn acquire(&self) -> Pooled<'_, T> {
        let value = match self.idle.pop() {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                self.retained
                    .fetch_sub(value.retained_bytes(), Ordering::Relaxed);
                value
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                #[cfg(feature = "logging")]
                trace!(pool = self.name, "pool miss, constructing instance");
                T::create(&self.policy)
            }
        };

        Pooled {
            pool: self,
            value: Some(value),
        }
    }

    /// Returns an instance to the idle set, or drops it if the policy says so.
    fn release(&self, mut value: T) {
        if !value.recycle(&self.policy) {
            self.discards.fetch_add(1, Ordering::Relaxed);
            #[cfg(feature = "logging")]
            debug!(
                pool = self.name,
                retained_bytes = value.retained_bytes(),
                "discarding oversized instance"
            );
            return;
        }

        // Count before publishing so a concurrent pop never underflows.
        self.retained
            .fetch_add(value.retained_bytes(), Ordering::Relaxed);
        self.idle.push(value);
        self.returns.fetch_add(1, Ordering::Relaxed);
    }

    /// Get pool statistics.
    pub(crate) fn stats(&self) -> PoolStats {
        PoolStats {
            size: self.idle.len(),
            retained_bytes: self.retained.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            discards: self.discards.load(Ordering::Relaxed),
        }
    }

    /// Removes every idle instance.
    #[cfg(test)]
    pub(crate) fn drain_idle(&self) -> Vec<T> {
        let mut drained = Vec::with_capacity(self.idle.len());
        while let Some(value) = self.idle.pop() {
            self.retained
                .fetch_sub(value.retained_bytes(), Ordering::Relaxed);
            drained.push(value);
        }
        drained
    }
}

impl<T: Poolable> fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("name", &self.name)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Pool statistics for monitoring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Idle instances currently held by the pool.
    pub size: usize,
    /// Heap bytes kept alive by idle instances.
    pub retained_bytes: usize,
    /// Instances handed out from the pool (cache hits).
    pub hits: usize,
    /// Instances constructed on demand (cache misses).
    pub misses: usize,
    /// Instances returned to the pool after use.
    pub returns: usize,
    /// Instances dropped instead of returned.
    pub discards: usize,
}

impl PoolStats {
    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// RAII guard that returns its instance to the pool on drop.
///
/// Release runs on every exit path of the borrowing scope, including early
/// returns through `?` and unwinding.
pub(crate) struct Pooled<'a, T: Poolable> {
    pool: &'a Pool<T>,
    value: Option<T>,
}

impl<T: Poolable> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("pooled value is present until drop")
    }
}

impl<T: Poolable> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("pooled value is present until drop")
    }
}

impl<T: Poolable> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            self.pool.release(value);
        }
    }
}
