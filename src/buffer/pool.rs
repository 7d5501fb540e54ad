//! Bounded lock-free pool of fixed-capacity buffers.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::queue::ArrayQueue;

use super::Buffer;
use crate::config::CacheConfig;
use crate::error::CacheError;

/// A bounded reservoir of idle buffers.
///
/// The pool is the only place buffers are allocated. [`BufferPool::get`]
/// reuses an idle buffer when one exists and allocates a fresh one otherwise;
/// [`BufferPool::offer`] queues a buffer for reuse or drops it when the idle
/// set is full. Neither call blocks.
///
/// # Example
///
/// ```
/// use directcache::BufferPool;
///
/// let pool = BufferPool::new(1, 3)?;
/// let a = pool.get();
/// let b = pool.get();
/// assert_eq!(a.capacity(), 3);
///
/// pool.offer(a);
/// pool.offer(b); // idle set already full, dropped
/// assert_eq!(pool.idle_count(), 1);
/// # Ok::<(), directcache::CacheError>(())
/// ```
#[derive(Debug)]
pub struct BufferPool {
    idle: ArrayQueue<Buffer>,
    buffer_capacity: usize,
    hits: AtomicUsize,
    misses: AtomicUsize,
    returns: AtomicUsize,
    drops: AtomicUsize,
}

impl BufferPool {
    /// Creates a pool that keeps at most `queue_capacity` idle buffers of
    /// `buffer_capacity` bytes each.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] if either value is zero.
    pub fn new(queue_capacity: usize, buffer_capacity: usize) -> Result<Self, CacheError> {
        Self::from_config(&CacheConfig::new(queue_capacity, buffer_capacity)?)
    }

    /// Creates a pool from a [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        config.validate()?;
        tracing::debug!(
            queue_capacity = config.queue_capacity(),
            buffer_capacity = config.buffer_capacity(),
            "buffer pool created"
        );
        Ok(Self {
            idle: ArrayQueue::new(config.queue_capacity()),
            buffer_capacity: config.buffer_capacity(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            returns: AtomicUsize::new(0),
            drops: AtomicUsize::new(0),
        })
    }

    /// Takes an idle buffer, or allocates a new one if none is idle.
    #[inline]
    pub fn get(&self) -> Buffer {
        if let Some(buf) = self.idle.pop() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            buf
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(capacity = self.buffer_capacity, "pool miss, allocating buffer");
            Buffer::allocate(self.buffer_capacity)
        }
    }

    /// Returns a buffer to the idle set.
    ///
    /// The buffer is cleared before it is queued. It is dropped instead if
    /// the idle set is full, it is read-only, it was not allocated by a pool,
    /// or its capacity differs from this pool's buffer capacity.
    #[inline]
    pub fn offer(&self, mut buf: Buffer) {
        if !buf.is_pooled() || buf.is_read_only() || buf.capacity() != self.buffer_capacity {
            self.drops.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(
                pooled = buf.is_pooled(),
                read_only = buf.is_read_only(),
                capacity = buf.capacity(),
                "buffer rejected by pool"
            );
            return;
        }

        buf.clear();

        if self.idle.push(buf).is_ok() {
            self.returns.fetch_add(1, Ordering::Relaxed);
        } else {
            self.drops.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Discards every idle buffer.
    pub fn clear(&self) {
        let mut discarded = 0usize;
        while self.idle.pop().is_some() {
            discarded += 1;
        }
        tracing::debug!(discarded, "buffer pool cleared");
    }

    /// Returns the number of idle buffers.
    #[inline]
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Returns the maximum number of idle buffers.
    pub fn queue_capacity(&self) -> usize {
        self.idle.capacity()
    }

    /// Returns the size of every buffer this pool allocates.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Returns pool statistics.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            idle: self.idle.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
            drops: self.drops.load(Ordering::Relaxed),
        }
    }
}

/// Pool statistics for monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers currently idle.
    pub idle: usize,
    /// Buffers handed out from the idle set.
    pub hits: usize,
    /// Buffers freshly allocated because the idle set was empty.
    pub misses: usize,
    /// Buffers accepted back into the idle set.
    pub returns: usize,
    /// Buffers discarded on return.
    pub drops: usize,
}

impl PoolStats {
    /// Total buffers allocated by the pool so far.
    pub fn allocated(&self) -> usize {
        self.misses
    }

    /// Fraction of `get` calls served from the idle set (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;

    #[test]
    fn test_pool_rejects_zero_capacities() {
        assert!(matches!(
            BufferPool::new(0, 16),
            Err(CacheError::InvalidConfig { .. })
        ));
        assert!(matches!(
            BufferPool::new(16, 0),
            Err(CacheError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_get_allocates_fixed_capacity() {
        let pool = BufferPool::new(4, 32).unwrap();
        let buf = pool.get();
        assert_eq!(buf.capacity(), 32);
        assert_eq!(buf.remaining_capacity(), 32);
        assert_eq!(pool.stats().misses, 1);
    }

    #[test]
    fn test_buffer_reuse() {
        let pool = BufferPool::new(4, 8).unwrap();
        let mut buf = pool.get();
        buf.put_slice(b"stale");
        buf.flip();
        pool.offer(buf);
        assert_eq!(pool.idle_count(), 1);

        let reused = pool.get();
        assert!(reused.is_empty());
        assert_eq!(reused.remaining_capacity(), 8);

        let stats = pool.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.returns, 1);
    }

    #[test]
    fn test_offer_beyond_capacity_is_dropped() {
        let pool = BufferPool::new(2, 8).unwrap();
        let bufs: Vec<_> = (0..5).map(|_| pool.get()).collect();
        for buf in bufs {
            pool.offer(buf);
        }
        assert_eq!(pool.idle_count(), 2);
        assert_eq!(pool.stats().drops, 3);
    }

    #[test]
    fn test_offer_rejects_unpoolable_buffers() {
        let pool = BufferPool::new(4, 8).unwrap();

        pool.offer(Buffer::wrap(BytesMut::with_capacity(8)));

        let mut read_only = pool.get();
        read_only.set_read_only();
        pool.offer(read_only);

        pool.offer(Buffer::allocate(16));

        assert_eq!(pool.idle_count(), 0);
        assert_eq!(pool.stats().drops, 3);
    }

    #[test]
    fn test_clear_discards_idle() {
        let pool = BufferPool::new(4, 8).unwrap();
        pool.offer(pool.get());
        pool.offer(pool.get());
        pool.clear();
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn test_hit_rate() {
        let stats = PoolStats {
            idle: 0,
            hits: 3,
            misses: 1,
            returns: 0,
            drops: 0,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(stats.allocated(), 1);
    }
}
