//! directcache
//!
//! An object cache that keeps values encoded in pooled buffers instead of
//! as live values.
//!
//! Each value is encoded by a pluggable [`Codec`] into an ordered list of
//! fixed-capacity buffers drawn from a bounded [`BufferPool`], and stored by
//! key in a concurrent map. Reads decode the buffers again; replaced and
//! removed entries return their buffers to the pool for reuse.
//!
//! The crate intentionally:
//! - does NOT evict entries
//! - does NOT persist anything
//! - does NOT distribute across nodes
//! - does NOT prescribe a serialization format
//!
//! It only does one thing: **value → pooled buffers → value**
//!
//! # Example
//!
//! ```
//! use directcache::{CacheConfig, DirectCache, RawCodec};
//!
//! // 3-byte buffers, keep at most one idle buffer around
//! let config = CacheConfig::new(1, 3)?;
//! let cache: DirectCache<&str, Vec<u8>, _> = DirectCache::new(&config, RawCodec)?;
//!
//! cache.put("a", b"7 bytes".to_vec())?; // three buffers: 3 + 3 + 1
//! assert_eq!(cache.get("a")?, Some(b"7 bytes".to_vec()));
//!
//! cache.remove("a")?;
//! assert_eq!(cache.pool().idle_count(), 1); // two of the three were dropped
//! # Ok::<(), directcache::CacheError>(())
//! ```
//!
//! # Concurrency
//!
//! Operations on different keys never wait on each other. Each stored entry
//! carries its own lock, taken only while that entry is decoded or its
//! buffers are recycled; the map is a sharded [`dashmap::DashMap`] and the
//! pool a lock-free bounded queue.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod cache;
mod codec;
mod config;
mod error;
mod stream;

//
// Public surface
//

pub use buffer::{Buffer, BufferList, BufferPool, PoolStats};
pub use cache::DirectCache;
pub use codec::{Codec, RawCodec, Utf8Codec};
pub use config::{CacheConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_QUEUE_CAPACITY};
pub use error::{BoxError, CacheError};
pub use stream::{ChunkedReader, ChunkedWriter};

#[cfg(feature = "codec-json")]
pub use codec::JsonCodec;
