#![no_main]

use std::io::{BufRead, Read, Write};

use directcache::{BufferPool, ChunkedWriter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, Vec<u8>)| {
    let (capacity, data) = input;
    let capacity = capacity as usize + 1;
    let pool = BufferPool::new(4, capacity).unwrap();

    // Write in uneven pieces
    let mut writer = ChunkedWriter::new(&pool);
    for piece in data.chunks(capacity / 2 + 1) {
        writer.write_all(piece).unwrap();
    }
    let mut list = writer.finish();

    // Verify: exactly as many buffers as needed
    assert_eq!(list.len(), data.len().div_ceil(capacity));
    assert_eq!(list.encoded_len(), data.len());

    // Verify: byte-wise and bulk reads both reconstruct the input
    let mut reader = list.reader();
    let mut bytewise = Vec::with_capacity(data.len());
    while let Ok(byte) = reader.read_byte() {
        bytewise.push(byte);
    }
    assert_eq!(bytewise, data);

    reader.rewind();
    let mut bulk = Vec::new();
    reader.read_to_end(&mut bulk).unwrap();
    assert_eq!(bulk, data);

    // Verify: no single read crosses a buffer boundary
    reader.rewind();
    while let Ok(chunk) = reader.fill_buf() {
        if chunk.is_empty() {
            break;
        }
        assert!(chunk.len() <= capacity);
        let n = chunk.len();
        reader.consume(n);
    }

    list.recycle(&pool);
    assert!(pool.idle_count() <= 4);
});
