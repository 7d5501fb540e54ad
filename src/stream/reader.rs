//! ChunkedReader - presents a buffer list as one continuous byte stream.

use std::io;

use crate::buffer::Buffer;

/// A read source over an ordered slice of flipped buffers.
///
/// Reads are served from the current buffer only; once it is exhausted the
/// reader moves on to the next buffer with unread bytes. A single
/// [`io::Read::read`] call never crosses a buffer boundary, so it may return
/// fewer bytes than requested. Codecs that need an exact count should use
/// `read_exact`, which turns a short stream into
/// [`io::ErrorKind::UnexpectedEof`].
///
/// [`ChunkedReader::rewind`] resets every cursor so the same bytes can be
/// decoded again.
#[derive(Debug)]
pub struct ChunkedReader<'a> {
    buffers: &'a mut [Buffer],
    current: usize,
}

impl<'a> ChunkedReader<'a> {
    /// Creates a reader over `buffers`, starting at the first buffer.
    pub fn new(buffers: &'a mut [Buffer]) -> Self {
        Self {
            buffers,
            current: 0,
        }
    }

    /// Moves `current` to the first buffer with unread bytes, if any.
    fn next_buffer(&mut self) -> Option<usize> {
        while self.current < self.buffers.len() {
            if self.buffers[self.current].has_remaining() {
                return Some(self.current);
            }
            self.current += 1;
        }
        None
    }

    /// Reads the next byte.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::UnexpectedEof`] once every buffer is exhausted.
    pub fn read_byte(&mut self) -> io::Result<u8> {
        self.next_buffer()
            .and_then(|idx| self.buffers[idx].get_u8())
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }

    /// Returns the number of unread bytes across all remaining buffers.
    pub fn remaining(&self) -> usize {
        self.buffers[self.current.min(self.buffers.len())..]
            .iter()
            .map(Buffer::remaining)
            .sum()
    }

    /// Resets the reader and every buffer's read cursor to the start.
    pub fn rewind(&mut self) {
        self.current = 0;
        for buf in self.buffers.iter_mut() {
            buf.rewind();
        }
    }
}

impl io::Read for ChunkedReader<'_> {
    fn read(&mut self, dest: &mut [u8]) -> io::Result<usize> {
        if dest.is_empty() {
            return Ok(0);
        }
        let Some(idx) = self.next_buffer() else {
            return Ok(0);
        };

        let buf = &mut self.buffers[idx];
        let n = dest.len().min(buf.remaining());
        dest[..n].copy_from_slice(&buf.chunk()[..n]);
        buf.advance(n);
        Ok(n)
    }
}

impl io::BufRead for ChunkedReader<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self.next_buffer() {
            Some(idx) => Ok(self.buffers[idx].chunk()),
            None => Ok(&[]),
        }
    }

    fn consume(&mut self, amt: usize) {
        if let Some(buf) = self.buffers.get_mut(self.current) {
            buf.advance(amt);
        }
    }
}
