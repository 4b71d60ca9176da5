//! BSON decoder.
//!
//! Recursive descent over one shared [`Reader`]. Each document is parsed
//! through a sub-reader bounded to its declared length, so a corrupt nested
//! length can never pull bytes from the parent. Any failure, at any depth,
//! is returned to the top-level caller as a single error; the elements built
//! so far are dropped with it.

use tracing::{debug, trace};

use crate::array::Array;
use crate::document::Document;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::types::{BsonBoolean, ElementType, DOCUMENT_END, DOCUMENT_OVERHEAD};

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Deepest nesting accepted; the top-level document is depth 1.
    /// `None` leaves depth bounded only by the input length.
    pub max_depth: Option<usize>,
    /// Fail with [`Error::TrailingBytes`] instead of returning a consumed
    /// count shorter than the input.
    pub reject_trailing_bytes: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: None,
            reject_trailing_bytes: false,
        }
    }
}

/// Configurable BSON decoder.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Creates a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }

    pub fn reject_trailing_bytes(mut self, reject: bool) -> Self {
        self.options.reject_trailing_bytes = reject;
        self
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes the document at the front of `bytes`.
    ///
    /// Returns the document and the number of bytes consumed, which always
    /// equals the declared length.
    pub fn decode_document(&self, bytes: &[u8]) -> Result<(Document, usize)> {
        let mut reader = Reader::new(bytes);
        let result = self
            .read_document(&mut reader, 1)
            .and_then(|doc| Ok((doc, self.finish(&reader, bytes.len())?)));
        if let Err(e) = &result {
            debug!(error = %e, len = bytes.len(), "bson document decode failed");
        }
        result
    }

    /// Decodes the array document at the front of `bytes`.
    pub fn decode_array(&self, bytes: &[u8]) -> Result<(Array, usize)> {
        let mut reader = Reader::new(bytes);
        let result = self
            .read_array(&mut reader, 1)
            .and_then(|arr| Ok((arr, self.finish(&reader, bytes.len())?)));
        if let Err(e) = &result {
            debug!(error = %e, len = bytes.len(), "bson array decode failed");
        }
        result
    }

    fn finish(&self, reader: &Reader<'_>, total: usize) -> Result<usize> {
        let consumed = reader.position();
        if self.options.reject_trailing_bytes && consumed != total {
            return Err(Error::TrailingBytes { consumed, total });
        }
        Ok(consumed)
    }

    /// Splits the next document off `reader` and positions the returned
    /// sub-reader after its length field.
    fn open<'a>(&self, reader: &mut Reader<'a>, depth: usize) -> Result<Reader<'a>> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Err(Error::MaxDepthExceeded(max));
            }
        }
        let declared = reader.peek_i32_le()?;
        if declared < DOCUMENT_OVERHEAD as i32 {
            return Err(Error::InvalidLength(declared));
        }
        let mut body = reader.sub_reader(declared as usize)?;
        body.read_i32_le()?;
        Ok(body)
    }

    fn read_document(&self, reader: &mut Reader<'_>, depth: usize) -> Result<Document> {
        let mut body = self.open(reader, depth)?;
        let mut doc = Document::new();
        while let Some((key, element)) = self.next_element(&mut body, depth)? {
            doc.put(&key, element)?;
        }
        Ok(doc)
    }

    fn read_array(&self, reader: &mut Reader<'_>, depth: usize) -> Result<Array> {
        let mut body = self.open(reader, depth)?;
        let mut arr = Array::new();
        while let Some((_, element)) = self.next_element(&mut body, depth)? {
            arr.add(element);
        }
        Ok(arr)
    }

    /// Reads one element, or `None` at the terminator.
    fn next_element(
        &self,
        body: &mut Reader<'_>,
        depth: usize,
    ) -> Result<Option<(String, Element)>> {
        let tag = body.read_u8()?;
        if tag == DOCUMENT_END {
            if body.has_more() {
                return Err(Error::LengthMismatch {
                    declared: body.position() + body.remaining(),
                    consumed: body.position(),
                });
            }
            return Ok(None);
        }

        let key = body.read_cstring()?;
        let element = match ElementType::from_u8(tag) {
            Some(ElementType::Double) => Element::Double(body.read_f64_le()?),
            Some(ElementType::String) => Element::String(read_string(body)?),
            Some(ElementType::Document) => {
                Element::Document(self.read_document(body, depth + 1)?)
            }
            Some(ElementType::Array) => Element::Array(self.read_array(body, depth + 1)?),
            Some(ElementType::Boolean) => {
                Element::Boolean(BsonBoolean::from_byte(body.read_u8()?))
            }
            Some(ElementType::Int32) => Element::Int32(body.read_i32_le()?),
            Some(ElementType::Int64) => Element::Int64(body.read_i64_le()?),
            _ => return Err(Error::UnsupportedElementType(tag)),
        };
        trace!(tag, key = %key, depth, "decoded element");
        Ok(Some((key, element)))
    }
}

fn read_string(reader: &mut Reader<'_>) -> Result<String> {
    let length = reader.read_i32_le()?;
    if length < 1 {
        return Err(Error::InvalidLength(length));
    }
    let bytes = reader.read_bytes(length as usize)?;
    let (last, text) = bytes
        .split_last()
        .ok_or(Error::InvalidLength(length))?;
    if *last != 0 {
        return Err(Error::MissingStringTerminator);
    }
    String::from_utf8(text.to_vec()).map_err(|_| Error::InvalidUtf8)
}

/// Decodes the document at the front of `bytes` with default options.
pub fn from_bytes_len(bytes: &[u8]) -> Result<(Document, usize)> {
    Decoder::new().decode_document(bytes)
}

/// Decodes the array document at the front of `bytes` with default options.
pub fn array_from_bytes_len(bytes: &[u8]) -> Result<(Array, usize)> {
    Decoder::new().decode_array(bytes)
}

/// Legacy entry point: takes the declared length as truth and reports no
/// errors. Malformed input yields an empty document.
pub fn from_bytes(bytes: &[u8]) -> Document {
    match from_bytes_len(bytes) {
        Ok((doc, _)) => doc,
        Err(e) => {
            debug!(error = %e, "discarding malformed document");
            Document::new()
        }
    }
}
