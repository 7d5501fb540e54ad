//! Error types for directcache.

use std::error::Error as StdError;
use std::fmt;

/// Boxed codec error carried by [`CacheError::Encode`] and [`CacheError::Decode`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// The value codec failed while encoding a value into buffers.
    Encode(BoxError),

    /// The value codec failed while decoding a stored value, or the stored
    /// byte stream ended before the codec was satisfied.
    Decode(BoxError),

    /// An I/O error occurred outside of the codec.
    Io(std::io::Error),
}

impl CacheError {
    pub(crate) fn encode<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        CacheError::Encode(err.into())
    }

    pub(crate) fn decode<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        CacheError::Decode(err.into())
    }

    /// Returns true if this error came from decoding a stored value.
    pub fn is_decode(&self) -> bool {
        matches!(self, CacheError::Decode(_))
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
            CacheError::Encode(e) => write!(f, "encode error: {}", e),
            CacheError::Decode(e) => write!(f, "decode error: {}", e),
            CacheError::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl StdError for CacheError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CacheError::Encode(e) | CacheError::Decode(e) => Some(e.as_ref()),
            CacheError::Io(e) => Some(e),
            CacheError::InvalidConfig { .. } => None,
        }
    }
}

impl From<std::io::Error> for CacheError {
    fn from(e: std::io::Error) -> Self {
        CacheError::Io(e)
    }
}
