//! The Buffer type - a fixed-capacity block with read/write cursors.

use bytes::BytesMut;

/// Where a buffer's memory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backing {
    /// Allocated by a [`BufferPool`](crate::BufferPool); eligible for reuse.
    Pooled,
    /// Supplied by the caller; never retained by a pool.
    Wrapped,
}

/// A fixed-capacity memory block.
///
/// A buffer starts in write mode: bytes are appended with [`Buffer::put_slice`]
/// until the capacity is exhausted. [`Buffer::flip`] seals it and switches to
/// read mode, where the readable region is exactly the bytes written and the
/// read cursor starts at zero. [`Buffer::rewind`] moves the read cursor back to
/// the start so the same bytes can be read again.
///
/// # Example
///
/// ```
/// use directcache::Buffer;
/// use bytes::BytesMut;
///
/// let mut buf = Buffer::wrap(BytesMut::from(&b"hello"[..]));
/// buf.flip();
/// assert_eq!(buf.chunk(), b"hello");
/// assert_eq!(buf.remaining_capacity(), 0);
/// ```
#[derive(Debug)]
pub struct Buffer {
    data: BytesMut,
    capacity: usize,
    read_pos: usize,
    flipped: bool,
    read_only: bool,
    backing: Backing,
}

impl Buffer {
    /// Allocates a new empty buffer of exactly `capacity` bytes.
    pub(crate) fn allocate(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
            capacity,
            read_pos: 0,
            flipped: false,
            read_only: false,
            backing: Backing::Pooled,
        }
    }

    /// Wraps caller-owned memory as a buffer.
    ///
    /// Existing contents of `data` count as already written. Wrapped buffers
    /// behave like any other buffer but are never kept by a pool.
    pub fn wrap(data: BytesMut) -> Self {
        let capacity = data.capacity();
        Self {
            data,
            capacity,
            read_pos: 0,
            flipped: false,
            read_only: false,
            backing: Backing::Wrapped,
        }
    }

    /// Returns the fixed capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns how many more bytes can be written.
    ///
    /// Flipped and read-only buffers accept no writes.
    pub fn remaining_capacity(&self) -> usize {
        if self.flipped || self.read_only {
            0
        } else {
            self.capacity - self.data.len()
        }
    }

    /// Appends as much of `src` as fits and returns the number of bytes taken.
    pub fn put_slice(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.remaining_capacity());
        self.data.extend_from_slice(&src[..n]);
        n
    }

    /// Switches from write mode to read mode.
    ///
    /// The read cursor moves to the start and the readable region becomes the
    /// bytes written so far. No further writes are accepted.
    pub fn flip(&mut self) {
        self.flipped = true;
        self.read_pos = 0;
    }

    /// Moves the read cursor back to the start.
    pub fn rewind(&mut self) {
        self.read_pos = 0;
    }

    /// Drops all contents and returns the buffer to write mode.
    pub fn clear(&mut self) {
        self.data.clear();
        self.read_pos = 0;
        self.flipped = false;
    }

    /// Returns the number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read_pos
    }

    /// Returns true if there are unread bytes.
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Returns the unread bytes.
    pub fn chunk(&self) -> &[u8] {
        &self.data[self.read_pos..]
    }

    /// Advances the read cursor by up to `cnt` bytes.
    pub fn advance(&mut self, cnt: usize) {
        self.read_pos += cnt.min(self.remaining());
    }

    /// Reads a single byte, if one is available.
    pub fn get_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.read_pos)?;
        self.read_pos += 1;
        Some(byte)
    }

    /// Marks this buffer read-only. Read-only buffers accept no writes and
    /// are never kept by a pool.
    pub fn set_read_only(&mut self) {
        self.read_only = true;
    }

    /// Returns true if the buffer is read-only.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Returns true if the buffer was allocated by a pool.
    pub fn is_pooled(&self) -> bool {
        self.backing == Backing::Pooled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_slice_respects_capacity() {
        let mut buf = Buffer::allocate(3);
        assert_eq!(buf.put_slice(b"ab"), 2);
        assert_eq!(buf.remaining_capacity(), 1);
        assert_eq!(buf.put_slice(b"cdef"), 1);
        assert_eq!(buf.remaining_capacity(), 0);
        assert_eq!(buf.put_slice(b"g"), 0);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_flip_limits_reads_to_written_bytes() {
        let mut buf = Buffer::allocate(8);
        buf.put_slice(b"abc");
        buf.flip();

        assert_eq!(buf.remaining(), 3);
        assert_eq!(buf.remaining_capacity(), 0);
        assert_eq!(buf.chunk(), b"abc");
    }

    #[test]
    fn test_cursor_advance_and_rewind() {
        let mut buf = Buffer::allocate(4);
        buf.put_slice(b"wxyz");
        buf.flip();

        assert_eq!(buf.get_u8(), Some(b'w'));
        buf.advance(2);
        assert_eq!(buf.chunk(), b"z");
        buf.advance(10);
        assert!(!buf.has_remaining());
        assert_eq!(buf.get_u8(), None);

        buf.rewind();
        assert_eq!(buf.chunk(), b"wxyz");
    }

    #[test]
    fn test_clear_restores_write_mode() {
        let mut buf = Buffer::allocate(4);
        buf.put_slice(b"data");
        buf.flip();
        buf.clear();

        assert!(buf.is_empty());
        assert_eq!(buf.remaining_capacity(), 4);
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut buf = Buffer::allocate(4);
        buf.set_read_only();
        assert!(buf.is_read_only());
        assert_eq!(buf.put_slice(b"x"), 0);
    }

    #[test]
    fn test_wrapped_buffer_keeps_contents() {
        let mut data = BytesMut::with_capacity(16);
        data.extend_from_slice(b"pre");
        let mut buf = Buffer::wrap(data);

        assert!(!buf.is_pooled());
        assert_eq!(buf.len(), 3);
        buf.flip();
        assert_eq!(buf.chunk(), b"pre");
    }
}
