//! Chunked byte-stream I/O over pooled buffers.
//!
//! - [`ChunkedWriter`] - `std::io::Write` sink that spreads bytes across pooled buffers
//! - [`ChunkedReader`] - `std::io::Read`/`BufRead` source over a finished buffer list
//!
//! # Example
//!
//! ```
//! use std::io::{Read, Write};
//! use directcache::{BufferPool, ChunkedWriter};
//!
//! let pool = BufferPool::new(8, 3)?;
//!
//! let mut writer = ChunkedWriter::new(&pool);
//! writer.write_all(b"chunked!")?;
//! let mut list = writer.finish();
//! assert_eq!(list.len(), 3);
//!
//! let mut out = String::new();
//! list.reader().read_to_string(&mut out)?;
//! assert_eq!(out, "chunked!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod reader;
mod writer;

pub use reader::ChunkedReader;
pub use writer::ChunkedWriter;
