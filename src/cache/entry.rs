//! Per-entry storage: one buffer list guarded by its own lock.

use parking_lot::Mutex;

use crate::buffer::{BufferList, BufferPool};
use crate::codec::Codec;
use crate::error::CacheError;

/// A published buffer list together with the lock that serializes decoding
/// and recycling of that list.
///
/// The slot becomes `None` once the buffers have been handed back to the
/// pool. Lists are always detached from the map before they are recycled,
/// so a reader that finds the slot empty holds a stale entry and must look
/// the key up again.
#[derive(Debug)]
pub(crate) struct StoredList {
    slot: Mutex<Option<BufferList>>,
}

impl StoredList {
    pub(crate) fn new(list: BufferList) -> Self {
        Self {
            slot: Mutex::new(Some(list)),
        }
    }

    /// Decodes the stored value and rewinds the list for the next reader.
    ///
    /// Returns `Ok(None)` only if the list was recycled, never for a stored value.
    pub(crate) fn decode<V, C>(&self, codec: &C) -> Result<Option<V>, CacheError>
    where
        C: Codec<V>,
    {
        let mut slot = self.slot.lock();
        let Some(list) = slot.as_mut() else {
            tracing::trace!("entry recycled before it could be read");
            return Ok(None);
        };

        let decoded = codec.decode(&mut list.reader());
        list.rewind();
        decoded.map(Some).map_err(CacheError::decode)
    }

    /// Decodes the stored value, then recycles the buffers.
    ///
    /// The buffers go back to the pool whether or not decoding succeeds.
    pub(crate) fn decode_and_recycle<V, C>(
        &self,
        codec: &C,
        pool: &BufferPool,
    ) -> Result<Option<V>, CacheError>
    where
        C: Codec<V>,
    {
        let mut slot = self.slot.lock();
        let Some(mut list) = slot.take() else {
            return Ok(None);
        };

        let decoded = codec.decode(&mut list.reader());
        list.recycle(pool);
        decoded.map(Some).map_err(CacheError::decode)
    }

    /// Recycles the buffers without decoding them.
    pub(crate) fn recycle(&self, pool: &BufferPool) {
        let mut slot = self.slot.lock();
        if let Some(list) = slot.take() {
            list.recycle(pool);
        }
    }

    #[cfg(test)]
    fn is_recycled(&self) -> bool {
        self.slot.lock().is_none()
    }
}
