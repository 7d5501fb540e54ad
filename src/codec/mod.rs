//! Pluggable value codecs.
//!
//! A [`Codec`] turns a value into a byte stream and back. The cache stores no
//! length prefix or type tag of its own: whatever the codec writes is exactly
//! what it will be asked to read, and the stream ends where the encoding ends.
//!
//! - [`RawCodec`] - `Vec<u8>` values stored verbatim
//! - [`Utf8Codec`] - `String` values stored as UTF-8
//! - [`JsonCodec`] - any serde type as JSON (requires `codec-json` feature)

use std::io::{self, BufRead, Read, Write};

#[cfg(feature = "codec-json")]
mod json;

#[cfg(feature = "codec-json")]
pub use json::JsonCodec;

/// Encodes values of type `V` into a byte sink and decodes them back.
///
/// Decoders receive a [`BufRead`] source whose individual reads may return
/// fewer bytes than requested; implementations must accumulate partial reads
/// (`read_exact`, `read_to_end` and friends already do).
///
/// # Example
///
/// ```
/// use std::io::{self, BufRead, Read, Write};
/// use directcache::Codec;
///
/// /// Stores a `u64` as 8 little-endian bytes.
/// struct U64Codec;
///
/// impl Codec<u64> for U64Codec {
///     type Error = io::Error;
///
///     fn encode<W: Write>(&self, value: &u64, sink: &mut W) -> io::Result<()> {
///         sink.write_all(&value.to_le_bytes())
///     }
///
///     fn decode<R: BufRead>(&self, source: &mut R) -> io::Result<u64> {
///         let mut raw = [0u8; 8];
///         source.read_exact(&mut raw)?;
///         Ok(u64::from_le_bytes(raw))
///     }
/// }
/// ```
pub trait Codec<V>: Send + Sync {
    /// Error raised by encoding or decoding.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Writes the encoded form of `value` into `sink`.
    fn encode<W: Write>(&self, value: &V, sink: &mut W) -> Result<(), Self::Error>;

    /// Reads one value from `source`.
    fn decode<R: BufRead>(&self, source: &mut R) -> Result<V, Self::Error>;
}

/// Stores byte vectors verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCodec;

impl Codec<Vec<u8>> for RawCodec {
    type Error = io::Error;

    fn encode<W: Write>(&self, value: &Vec<u8>, sink: &mut W) -> io::Result<()> {
        sink.write_all(value)
    }

    fn decode<R: BufRead>(&self, source: &mut R) -> io::Result<Vec<u8>> {
        let mut out = Vec::new();
        source.read_to_end(&mut out)?;
        Ok(out)
    }
}

/// Stores strings as UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Codec;

impl Codec<String> for Utf8Codec {
    type Error = io::Error;

    fn encode<W: Write>(&self, value: &String, sink: &mut W) -> io::Result<()> {
        sink.write_all(value.as_bytes())
    }

    fn decode<R: BufRead>(&self, source: &mut R) -> io::Result<String> {
        let mut out = String::new();
        source.read_to_string(&mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferPool;
    use crate::stream::ChunkedWriter;

    #[test]
    fn test_raw_codec_across_buffers() {
        let pool = BufferPool::new(8, 4).unwrap();
        let value: Vec<u8> = (0..=20).collect();

        let mut writer = ChunkedWriter::new(&pool);
        RawCodec.encode(&value, &mut writer).unwrap();
        let mut list = writer.finish();

        let decoded = RawCodec.decode(&mut list.reader()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_utf8_codec_multibyte_split() {
        // 3-byte chars straddle 2-byte buffer boundaries
        let pool = BufferPool::new(8, 2).unwrap();
        let value = "日本語テキスト".to_string();

        let mut writer = ChunkedWriter::new(&pool);
        Utf8Codec.encode(&value, &mut writer).unwrap();
        let mut list = writer.finish();

        let decoded = Utf8Codec.decode(&mut list.reader()).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_utf8_codec_rejects_invalid_bytes() {
        let pool = BufferPool::new(8, 4).unwrap();
        let mut writer = ChunkedWriter::new(&pool);
        writer.write_bytes(&[0xFF, 0xFE, 0xFD]);
        let mut list = writer.finish();

        let err = Utf8Codec.decode(&mut list.reader()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
