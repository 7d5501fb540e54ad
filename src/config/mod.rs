//! Configuration for the cache and its buffer pool.
//!
//! - [`CacheConfig`] - Buffer size and idle-buffer retention limits
//!
//! # Example
//!
//! ```
//! use directcache::CacheConfig;
//!
//! // Explicit limits
//! let config = CacheConfig::new(64, 4096)?;
//!
//! // Builder pattern
//! let config = CacheConfig::default()
//!     .with_queue_capacity(256)
//!     .with_buffer_capacity(16 * 1024);
//! assert!(config.validate().is_ok());
//! # Ok::<(), directcache::CacheError>(())
//! ```

use crate::error::CacheError;

/// Default number of idle buffers retained by the pool.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Default size of each pooled buffer (8 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Construction-time configuration for a [`BufferPool`](crate::BufferPool)
/// and the [`DirectCache`](crate::DirectCache) built on it.
///
/// Both limits must be non-zero:
///
/// - `queue_capacity` - Maximum number of idle buffers the pool keeps for
///   reuse. Buffers returned beyond this are discarded.
/// - `buffer_capacity` - Size in bytes of every buffer the pool hands out.
///
/// # Example
///
/// ```
/// use directcache::CacheConfig;
///
/// let config = CacheConfig::new(1, 3)?;
/// assert_eq!(config.queue_capacity(), 1);
/// assert_eq!(config.buffer_capacity(), 3);
/// # Ok::<(), directcache::CacheError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheConfig {
    /// Maximum idle buffers retained by the pool.
    queue_capacity: usize,

    /// Bytes per buffer.
    buffer_capacity: usize,
}

impl CacheConfig {
    /// Creates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] if either limit is zero.
    pub fn new(queue_capacity: usize, buffer_capacity: usize) -> Result<Self, CacheError> {
        if queue_capacity == 0 {
            return Err(CacheError::InvalidConfig {
                message: "queue_capacity must be greater than zero",
            });
        }

        if buffer_capacity == 0 {
            return Err(CacheError::InvalidConfig {
                message: "buffer_capacity must be greater than zero",
            });
        }

        Ok(Self {
            queue_capacity,
            buffer_capacity,
        })
    }

    /// Sets the maximum number of idle buffers.
    ///
    /// Note: This does not validate the configuration. Use [`CacheConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Sets the size of each buffer in bytes.
    ///
    /// Note: This does not validate the configuration. Use [`CacheConfig::validate`]
    /// to check if the configuration is valid.
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Returns the maximum number of idle buffers.
    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    /// Returns the size of each buffer in bytes.
    pub fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), CacheError> {
        Self::new(self.queue_capacity, self.buffer_capacity).map(|_| ())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
