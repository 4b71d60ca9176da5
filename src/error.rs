//! Error types for bsonlite operations.

use thiserror::Error;

/// Result type for bsonlite operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bsonlite operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Buffer underflow during decoding.
    #[error("buffer underflow: needed {needed} bytes, only {available} available")]
    BufferUnderflow { needed: usize, available: usize },

    /// A document or string length field that cannot be valid.
    #[error("invalid length field: {0}")]
    InvalidLength(i32),

    /// The terminator was found before the declared end of the document.
    #[error("length mismatch: declared {declared} bytes, terminator after {consumed}")]
    LengthMismatch { declared: usize, consumed: usize },

    /// String payload does not end with a NUL byte.
    #[error("string payload is missing its NUL terminator")]
    MissingStringTerminator,

    /// Tag byte is unknown or names a type this codec does not implement.
    #[error("unsupported element type: {0:#04x}")]
    UnsupportedElementType(u8),

    /// Invalid UTF-8 in a key or string.
    #[error("invalid UTF-8 string")]
    InvalidUtf8,

    /// Key does not fit in the key buffer.
    #[error("key too long: {len} bytes, maximum is {max}")]
    KeyTooLong { len: usize, max: usize },

    /// Key cannot be written as a cstring.
    #[error("invalid key {0:?}: keys must not contain NUL")]
    InvalidKey(String),

    /// Key not present in the document.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Element exists but holds a different type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Nesting deeper than the configured maximum.
    #[error("maximum nesting depth {0} exceeded")]
    MaxDepthExceeded(usize),

    /// Bytes left over after the top-level document.
    #[error("trailing bytes: document consumed {consumed} of {total} bytes")]
    TrailingBytes { consumed: usize, total: usize },

    /// Document larger than a reader accepts.
    #[error("document size {size} exceeds maximum {max}")]
    DocumentTooLarge { size: usize, max: usize },

    /// Handle that is not (or no longer) live in its table.
    #[error("invalid handle: {0}")]
    InvalidHandle(u64),

    /// Unexpected end of file.
    #[error("unexpected end of file")]
    UnexpectedEof,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates a buffer underflow error.
    pub fn buffer_underflow(needed: usize, available: usize) -> Self {
        Self::BufferUnderflow { needed, available }
    }

    /// Creates a type mismatch error.
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }

    /// Creates a custom error.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    /// Returns true if the input ended before the format said it would.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::BufferUnderflow { .. } | Self::UnexpectedEof)
    }
}
