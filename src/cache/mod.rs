//! The cache - a concurrent key to buffer-list map.
//!
//! Values never live in the map as values. Each `put` encodes the value
//! through a [`ChunkedWriter`] into buffers drawn from the [`BufferPool`],
//! and each read decodes it again through a
//! [`ChunkedReader`](crate::ChunkedReader). Replaced and removed entries hand
//! their buffers back to the pool.
//!
//! Locking is per entry. The map itself is sharded and lock-free for
//! readers of other shards; every stored list carries its own mutex, held
//! only around decode and recycle of that one list and never nested.

mod entry;

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use self::entry::StoredList;
use crate::buffer::{BufferList, BufferPool};
use crate::codec::Codec;
use crate::config::CacheConfig;
use crate::error::CacheError;
use crate::stream::ChunkedWriter;

/// A concurrent cache that keeps values encoded in pooled buffers.
///
/// `K` is the key type, `V` the value type and `C` the [`Codec`] that
/// converts between `V` and bytes.
///
/// # Example
///
/// ```
/// use directcache::{CacheConfig, DirectCache, Utf8Codec};
///
/// let cache: DirectCache<&str, String, _> = DirectCache::new(&CacheConfig::new(16, 4)?, Utf8Codec)?;
///
/// assert_eq!(cache.put("greeting", "hello".to_string())?, None);
/// assert_eq!(cache.get("greeting")?, Some("hello".to_string()));
///
/// let old = cache.put("greeting", "bonjour".to_string())?;
/// assert_eq!(old, Some("hello".to_string()));
///
/// assert_eq!(cache.remove("greeting")?, Some("bonjour".to_string()));
/// assert_eq!(cache.get("greeting")?, None);
/// # Ok::<(), directcache::CacheError>(())
/// ```
pub struct DirectCache<K, V, C> {
    map: DashMap<K, Arc<StoredList>>,
    pool: Arc<BufferPool>,
    codec: C,
    _value: PhantomData<fn() -> V>,
}

impl<K, V, C> DirectCache<K, V, C>
where
    K: Eq + Hash,
    C: Codec<V>,
{
    /// Creates a cache backed by a new pool built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] if `config` is invalid.
    pub fn new(config: &CacheConfig, codec: C) -> Result<Self, CacheError> {
        let pool = BufferPool::from_config(config)?;
        Ok(Self::with_pool(Arc::new(pool), codec))
    }

    /// Creates a cache that draws buffers from an existing, possibly shared, pool.
    pub fn with_pool(pool: Arc<BufferPool>, codec: C) -> Self {
        Self {
            map: DashMap::new(),
            pool,
            codec,
            _value: PhantomData,
        }
    }

    /// Stores `value` under `key` and returns the value it replaced.
    ///
    /// Passing `None` stores nothing: the current value, if any, is left in
    /// place and returned.
    ///
    /// # Errors
    ///
    /// - [`CacheError::Encode`] if `value` cannot be encoded. The map is unchanged.
    /// - [`CacheError::Decode`] if the replaced value cannot be decoded. The new
    ///   value is still installed and the old buffers are still recycled.
    pub fn put(&self, key: K, value: impl Into<Option<V>>) -> Result<Option<V>, CacheError> {
        let Some(value) = value.into() else {
            return self.get(&key);
        };

        let list = self.encode(&value)?;
        let Some(previous) = self.map.insert(key, Arc::new(StoredList::new(list))) else {
            return Ok(None);
        };

        previous
            .decode_and_recycle(&self.codec, &self.pool)
            .inspect_err(|e| tracing::warn!(error = %e, "failed to decode replaced value"))
    }

    /// Stores `value` under `key` only if the key is absent.
    ///
    /// Returns `None` if the value was stored, or the existing value
    /// otherwise. The value is encoded before the map is consulted; if
    /// another entry wins, the unused encoding goes straight back to the pool.
    /// Passing `None` stores nothing and returns the current value.
    pub fn put_if_absent(
        &self,
        key: K,
        value: impl Into<Option<V>>,
    ) -> Result<Option<V>, CacheError> {
        let Some(value) = value.into() else {
            return self.get(&key);
        };

        let candidate = self.encode(&value)?;
        let mut key = key;
        loop {
            let winner = match self.map.entry(key) {
                Entry::Occupied(existing) => {
                    let winner = Arc::clone(existing.get());
                    key = existing.into_key();
                    winner
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(Arc::new(StoredList::new(candidate)));
                    return Ok(None);
                }
            };

            // A recycled winner was already detached; look the key up again.
            let Some(existing) = winner.decode(&self.codec).transpose() else {
                continue;
            };

            // Never published, so no other thread can hold it.
            candidate.recycle(&self.pool);
            return existing.map(Some);
        }
    }

    /// Stores every pair, replacing existing values without decoding them.
    ///
    /// Stops at the first value that fails to encode; pairs before it stay stored.
    pub fn put_all<I>(&self, entries: I) -> Result<(), CacheError>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            let list = self.encode(&value)?;
            if let Some(previous) = self.map.insert(key, Arc::new(StoredList::new(list))) {
                previous.recycle(&self.pool);
            }
        }
        Ok(())
    }

    /// Returns the value stored under `key`, if any.
    ///
    /// The entry stays cached; repeated calls decode the same bytes again.
    /// A read that races a replace returns either the old or the new value,
    /// never `None`.
    pub fn get<Q>(&self, key: &Q) -> Result<Option<V>, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        loop {
            let Some(entry) = self.map.get(key).map(|e| Arc::clone(e.value())) else {
                return Ok(None);
            };
            // Lists are detached from the map before they are recycled, so a
            // second lookup sees the replacement or no entry at all.
            if let Some(value) = entry.decode(&self.codec)? {
                return Ok(Some(value));
            }
        }
    }

    /// Removes `key` and returns the value it held.
    ///
    /// The entry's buffers are recycled even if decoding fails.
    pub fn remove<Q>(&self, key: &Q) -> Result<Option<V>, CacheError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some((_, entry)) = self.map.remove(key) else {
            return Ok(None);
        };
        entry
            .decode_and_recycle(&self.codec, &self.pool)
            .inspect_err(|e| tracing::warn!(error = %e, "failed to decode removed value"))
    }

    /// Removes every entry and recycles its buffers.
    ///
    /// Each shard of the map is emptied atomically; the buffers are recycled
    /// afterwards, one entry lock at a time.
    pub fn clear(&self) {
        let mut detached = Vec::new();
        self.map.retain(|_, entry| {
            detached.push(Arc::clone(entry));
            false
        });

        tracing::debug!(entries = detached.len(), "cache cleared");
        for entry in detached {
            entry.recycle(&self.pool);
        }
    }

    /// Returns true if `key` has a stored value.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a snapshot of the stored keys.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.map.iter().map(|e| e.key().clone()).collect()
    }

    /// Returns the pool this cache draws buffers from.
    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    /// Returns the value codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn encode(&self, value: &V) -> Result<BufferList, CacheError> {
        let mut writer = ChunkedWriter::new(&self.pool);
        self.codec
            .encode(value, &mut writer)
            .map_err(CacheError::encode)?;
        Ok(writer.finish())
    }
}

impl<K, V, C> fmt::Debug for DirectCache<K, V, C>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectCache")
            .field("entries", &self.map.len())
            .field("pool", &self.pool.stats())
            .finish()
    }
}
