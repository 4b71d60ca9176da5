//! bsonlite - BSON document codec with bounds-checked decoding
//!
//! Supports the double, string, document, array, boolean, int32 and int64
//! element types. Decoding never reads past the input and reports exactly how
//! many bytes a document occupied, so documents can be embedded in larger
//! buffers.
//!
//! # Example
//!
//! ```rust
//! use bsonlite::{Array, Document, Result};
//!
//! fn main() -> Result<()> {
//!     // Encoding
//!     let mut values = Array::new();
//!     values.add_int64(100);
//!     values.add_int64(200);
//!
//!     let mut doc = Document::new();
//!     doc.put_int32("testint", 12345)?;
//!     doc.put_array("values", values)?;
//!     let data = doc.to_bytes();
//!     assert_eq!(data.len(), doc.size());
//!
//!     // Decoding
//!     let (decoded, consumed) = Document::from_bytes_len(&data)?;
//!     assert_eq!(consumed, data.len());
//!     assert_eq!(decoded.get_int32("testint"), 12345);
//!     assert_eq!(decoded.get_array("values").unwrap().get_int64(1), 200);
//!     Ok(())
//! }
//! ```

mod array;
pub mod decode;
mod document;
mod element;
pub mod encode;
mod error;
pub mod handles;
mod reader;
pub mod stream;
mod types;
mod writer;

pub use array::Array;
pub use decode::{DecodeOptions, Decoder};
pub use document::{Document, Entries};
pub use element::Element;
pub use error::{Error, Result};
pub use handles::{ArrayHandle, DocumentHandle, Handles};
pub use reader::Reader;
pub use stream::{StreamReader, StreamWriter};
pub use types::{BsonBoolean, ElementType, MAX_KEY_LEN};
pub use writer::Writer;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Encodes a document.
pub fn to_bytes(doc: &Document) -> Vec<u8> {
    encode::to_bytes(doc)
}

/// Decodes the document at the front of `data`, returning it with the number
/// of bytes it occupied.
pub fn from_bytes_len(data: &[u8]) -> Result<(Document, usize)> {
    decode::from_bytes_len(data)
}

/// Decodes a document, yielding an empty one for malformed input.
pub fn from_bytes(data: &[u8]) -> Document {
    decode::from_bytes(data)
}
