//! ChunkedWriter - serializes a byte stream into pooled buffers.

use std::io;

use crate::buffer::{Buffer, BufferList, BufferPool};

/// A write sink that places bytes into a growing list of pooled buffers.
///
/// Bytes fill the tail buffer until it is full; a new buffer is pulled from
/// the pool only when there is a byte that needs a home. The finished list
/// therefore holds exactly as many buffers as the written bytes require.
///
/// [`ChunkedWriter::finish`] consumes the writer, flips every buffer into
/// read mode and hands the list over. A writer dropped before `finish`
/// (for example because the codec failed mid-encode) returns its buffers to
/// the pool.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use directcache::{BufferPool, ChunkedWriter};
///
/// let pool = BufferPool::new(4, 3)?;
/// let mut writer = ChunkedWriter::new(&pool);
/// writer.write_all(b"abcdef")?;
///
/// let list = writer.finish();
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.encoded_len(), 6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct ChunkedWriter<'p> {
    pool: &'p BufferPool,
    buffers: Vec<Buffer>,
    written: usize,
}

impl<'p> ChunkedWriter<'p> {
    /// Creates a writer that draws buffers from `pool`.
    pub fn new(pool: &'p BufferPool) -> Self {
        Self {
            pool,
            buffers: Vec::new(),
            written: 0,
        }
    }

    /// Appends `src`, pulling new buffers from the pool as needed.
    ///
    /// A zero-length write is a no-op.
    pub fn write_bytes(&mut self, mut src: &[u8]) {
        while !src.is_empty() {
            let tail_full = self
                .buffers
                .last()
                .is_none_or(|tail| tail.remaining_capacity() == 0);
            if tail_full {
                self.buffers.push(self.pool.get());
            }

            if let Some(tail) = self.buffers.last_mut() {
                let n = tail.put_slice(src);
                self.written += n;
                src = &src[n..];
            }
        }
    }

    /// Returns the number of bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    /// Returns the number of buffers acquired so far.
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Flips every buffer into read mode and returns the list.
    pub fn finish(mut self) -> BufferList {
        let mut buffers = std::mem::take(&mut self.buffers);
        for buf in &mut buffers {
            buf.flip();
        }
        BufferList::from_buffers(buffers)
    }
}

impl io::Write for ChunkedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_bytes(buf);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ChunkedWriter<'_> {
    fn drop(&mut self) {
        if self.buffers.is_empty() {
            return;
        }
        tracing::trace!(
            buffers = self.buffers.len(),
            "unfinished writer returning buffers to pool"
        );
        for buf in self.buffers.drain(..) {
            self.pool.offer(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_zero_length_write_is_noop() {
        let pool = BufferPool::new(4, 3).unwrap();
        let mut writer = ChunkedWriter::new(&pool);
        writer.write_bytes(&[]);
        assert_eq!(writer.buffer_count(), 0);

        let list = writer.finish();
        assert!(list.is_empty());
        assert_eq!(pool.stats().misses, 0);
    }

    #[test]
    fn test_spills_into_new_buffers() {
        let pool = BufferPool::new(4, 3).unwrap();
        let mut writer = ChunkedWriter::new(&pool);
        writer.write_all(b"abcdefg").unwrap();
        assert_eq!(writer.bytes_written(), 7);

        let list = writer.finish();
        let lens: Vec<_> = list.buffers().iter().map(Buffer::remaining).collect();
        assert_eq!(lens, vec![3, 3, 1]);
    }

    #[test]
    fn test_exact_multiple_has_no_trailing_buffer() {
        let pool = BufferPool::new(4, 4).unwrap();
        let mut writer = ChunkedWriter::new(&pool);
        writer.write_all(&[0xAB; 8]).unwrap();

        let list = writer.finish();
        assert_eq!(list.len(), 2);
        assert!(list.buffers().iter().all(|b| b.remaining() == 4));
    }

    #[test]
    fn test_small_writes_share_tail() {
        let pool = BufferPool::new(4, 4).unwrap();
        let mut writer = ChunkedWriter::new(&pool);
        for byte in b"abcde" {
            writer.write_all(&[*byte]).unwrap();
        }

        let list = writer.finish();
        assert_eq!(list.len(), 2);
        assert_eq!(list.buffers()[0].chunk(), b"abcd");
        assert_eq!(list.buffers()[1].chunk(), b"e");
    }

    #[test]
    fn test_finish_seals_buffers() {
        let pool = BufferPool::new(4, 4).unwrap();
        let mut writer = ChunkedWriter::new(&pool);
        writer.write_all(b"ab").unwrap();

        let list = writer.finish();
        assert_eq!(list.buffers()[0].remaining_capacity(), 0);
        assert_eq!(pool.idle_count(), 0);
    }

    #[test]
    fn test_drop_unfinished_returns_buffers() {
        let pool = BufferPool::new(8, 2).unwrap();
        {
            let mut writer = ChunkedWriter::new(&pool);
            writer.write_all(b"abcde").unwrap();
            assert_eq!(writer.buffer_count(), 3);
        }
        assert_eq!(pool.idle_count(), 3);
    }
}
