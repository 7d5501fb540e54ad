//! Fixed-capacity buffers and the bounded pool that recycles them.
//!
//! - [`Buffer`] - One fixed-capacity block with independent read/write cursors
//! - [`BufferList`] - Ordered buffers holding one value's encoded byte stream
//! - [`BufferPool`] - Bounded, lock-free reservoir of idle buffers

mod block;
mod list;
mod pool;

pub use block::Buffer;
pub use list::BufferList;
pub use pool::{BufferPool, PoolStats};
