//! The BufferList type - one value's encoded bytes spread across buffers.

use super::{Buffer, BufferPool};
use crate::stream::ChunkedReader;

/// An ordered sequence of flipped buffers.
///
/// Reading the unread bytes of every buffer in order yields exactly the byte
/// stream that was written, with no gaps and no trailing empty buffers.
/// Lists are produced by [`ChunkedWriter::finish`](crate::ChunkedWriter::finish).
#[derive(Debug, Default)]
pub struct BufferList {
    buffers: Vec<Buffer>,
}

impl BufferList {
    pub(crate) fn from_buffers(buffers: Vec<Buffer>) -> Self {
        Self { buffers }
    }

    /// Returns the number of buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true if the list holds no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Returns the total number of encoded bytes across all buffers.
    pub fn encoded_len(&self) -> usize {
        self.buffers.iter().map(Buffer::len).sum()
    }

    /// Returns the buffers in order.
    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    /// Returns a reader over the unread bytes of this list.
    pub fn reader(&mut self) -> ChunkedReader<'_> {
        ChunkedReader::new(&mut self.buffers)
    }

    /// Resets every buffer's read cursor to the start.
    pub fn rewind(&mut self) {
        for buf in &mut self.buffers {
            buf.rewind();
        }
    }

    /// Hands every buffer back to `pool`.
    pub fn recycle(self, pool: &BufferPool) {
        for buf in self.buffers {
            pool.offer(buf);
        }
    }

    /// Consumes the list and returns its buffers.
    pub fn into_buffers(self) -> Vec<Buffer> {
        self.buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn list_of(pool: &BufferPool, parts: &[&[u8]]) -> BufferList {
        let buffers = parts
            .iter()
            .map(|part| {
                let mut buf = pool.get();
                buf.put_slice(part);
                buf.flip();
                buf
            })
            .collect();
        BufferList::from_buffers(buffers)
    }

    #[test]
    fn test_encoded_len() {
        let pool = BufferPool::new(4, 3).unwrap();
        let list = list_of(&pool, &[b"abc", b"de"]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.encoded_len(), 5);
    }

    #[test]
    fn test_rewind_after_read() {
        let pool = BufferPool::new(4, 3).unwrap();
        let mut list = list_of(&pool, &[b"abc", b"de"]);

        let mut out = Vec::new();
        list.reader().read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abcde");
        assert!(list.buffers().iter().all(|b| !b.has_remaining()));

        list.rewind();
        out.clear();
        list.reader().read_to_end(&mut out).unwrap();
        assert_eq!(out, b"abcde");
    }

    #[test]
    fn test_recycle_returns_buffers() {
        let pool = BufferPool::new(8, 3).unwrap();
        let list = list_of(&pool, &[b"abc", b"def", b"g"]);
        list.recycle(&pool);
        assert_eq!(pool.idle_count(), 3);
    }
}
