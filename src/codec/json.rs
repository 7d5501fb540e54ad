//! JSON codec for any serde type.

use std::fmt;
use std::io::{BufRead, Write};
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::Codec;

/// Encodes values as JSON with `serde_json`.
///
/// # Example
///
/// ```
/// use directcache::{CacheConfig, DirectCache, JsonCodec};
///
/// let cache: DirectCache<&str, Vec<u32>, _> =
///     DirectCache::new(&CacheConfig::new(16, 8)?, JsonCodec::new())?;
/// cache.put("primes", vec![2u32, 3, 5, 7, 11, 13])?;
/// assert_eq!(cache.get("primes")?, Some(vec![2, 3, 5, 7, 11, 13]));
/// # Ok::<(), directcache::CacheError>(())
/// ```
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    /// Creates a JSON codec.
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonCodec<T> {}

impl<T> fmt::Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonCodec").finish()
    }
}

impl<T> Codec<T> for JsonCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    type Error = serde_json::Error;

    fn encode<W: Write>(&self, value: &T, sink: &mut W) -> Result<(), Self::Error> {
        serde_json::to_writer(sink, value)
    }

    fn decode<R: BufRead>(&self, source: &mut R) -> Result<T, Self::Error> {
        serde_json::from_reader(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferPool;
    use crate::stream::ChunkedWriter;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Session {
        user: String,
        roles: Vec<String>,
        ttl: u32,
    }

    #[test]
    fn test_json_struct_across_small_buffers() {
        let pool = BufferPool::new(16, 5).unwrap();
        let codec = JsonCodec::<Session>::new();
        let value = Session {
            user: "alice".into(),
            roles: vec!["admin".into(), "ops".into()],
            ttl: 3600,
        };

        let mut writer = ChunkedWriter::new(&pool);
        codec.encode(&value, &mut writer).unwrap();
        let mut list = writer.finish();
        assert!(list.len() > 1);

        assert_eq!(codec.decode(&mut list.reader()).unwrap(), value);
    }

    #[test]
    fn test_json_truncated_stream_fails() {
        let pool = BufferPool::new(4, 4).unwrap();
        let mut writer = ChunkedWriter::new(&pool);
        writer.write_bytes(br#"{"user":"bo"#);
        let mut list = writer.finish();

        assert!(JsonCodec::<Session>::new().decode(&mut list.reader()).is_err());
    }
}
