//! Whole-document framing over `std::io`.
//!
//! BSON documents carry their own length, so a byte stream of concatenated
//! documents (the layout of a `.bson` dump file) needs no extra framing. The
//! reader pulls one complete document into memory before decoding it; it does
//! not parse across partial reads.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//! use bsonlite::stream::{StreamReader, StreamWriter};
//! use bsonlite::{Document, Result};
//!
//! fn main() -> Result<()> {
//!     let mut buffer = Vec::new();
//!     {
//!         let mut stream = StreamWriter::new(&mut buffer);
//!         let mut doc = Document::new();
//!         doc.put_int32("n", 1)?;
//!         stream.write_document(&doc)?;
//!         stream.flush()?;
//!     }
//!
//!     let mut stream = StreamReader::new(Cursor::new(&buffer));
//!     let doc = stream.read_document()?;
//!     assert_eq!(doc.get_int32("n"), 1);
//!     assert!(stream.try_read_document()?.is_none());
//!     Ok(())
//! }
//! ```

use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::decode::Decoder;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::types::DOCUMENT_OVERHEAD;

/// Default buffer capacity for stream readers/writers.
const DEFAULT_BUFFER_CAPACITY: usize = 8192;

/// Maximum document size accepted by default (16 MiB, the MongoDB limit).
const DEFAULT_MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// StreamWriter writes encoded documents back to back.
pub struct StreamWriter<W: Write> {
    inner: BufWriter<W>,
}

impl<W: Write> StreamWriter<W> {
    /// Creates a new StreamWriter wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, writer)
    }

    /// Creates a new StreamWriter with the specified buffer capacity.
    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Self {
            inner: BufWriter::with_capacity(capacity, writer),
        }
    }

    /// Encodes and writes one document.
    pub fn write_document(&mut self, doc: &Document) -> Result<()> {
        self.inner.write_all(&doc.to_bytes())?;
        Ok(())
    }

    /// Flushes the underlying buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(Error::from)
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        self.inner.get_ref()
    }

    /// Consumes this StreamWriter, returning the underlying writer.
    ///
    /// Flushes any buffered data first.
    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| Error::from(e.into_error()))
    }
}

/// StreamReader reads concatenated documents from a byte stream.
pub struct StreamReader<R: Read> {
    inner: BufReader<R>,
    decoder: Decoder,
    max_document_size: usize,
}

impl<R: Read> StreamReader<R> {
    /// Creates a new StreamReader wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, reader)
    }

    /// Creates a new StreamReader with the specified buffer capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            inner: BufReader::with_capacity(capacity, reader),
            decoder: Decoder::new(),
            max_document_size: DEFAULT_MAX_DOCUMENT_SIZE,
        }
    }

    /// Sets the maximum allowed document size.
    pub fn set_max_document_size(&mut self, size: usize) {
        self.max_document_size = size;
    }

    /// Replaces the decoder used for each frame.
    pub fn set_decoder(&mut self, decoder: Decoder) {
        self.decoder = decoder;
    }

    /// Reads one document. Fails if the stream ends before it is complete.
    pub fn read_document(&mut self) -> Result<Document> {
        self.try_read_document()?.ok_or(Error::UnexpectedEof)
    }

    /// Reads one document, returning None if the stream is at EOF.
    pub fn try_read_document(&mut self) -> Result<Option<Document>> {
        let mut header = [0u8; 4];
        let mut filled = 0;
        while filled < header.len() {
            match self.inner.read(&mut header[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(Error::UnexpectedEof),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::from(e)),
            }
        }

        let declared = (&header[..]).read_i32::<LittleEndian>()?;
        if declared < DOCUMENT_OVERHEAD as i32 {
            return Err(Error::InvalidLength(declared));
        }
        let size = declared as usize;
        if size > self.max_document_size {
            return Err(Error::DocumentTooLarge {
                size,
                max: self.max_document_size,
            });
        }

        let mut frame = vec![0u8; size];
        frame[..4].copy_from_slice(&header);
        self.inner.read_exact(&mut frame[4..]).map_err(|e| match e.kind() {
            ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            _ => Error::from(e),
        })?;

        let (doc, _) = self.decoder.decode_document(&frame)?;
        Ok(Some(doc))
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref()
    }
}

/// Iterator over documents in a stream.
pub struct DocumentIter<'a, R: Read> {
    reader: &'a mut StreamReader<R>,
}

impl<R: Read> StreamReader<R> {
    /// Returns an iterator over the remaining documents in the stream.
    pub fn documents(&mut self) -> DocumentIter<'_, R> {
        DocumentIter { reader: self }
    }
}

impl<R: Read> Iterator for DocumentIter<'_, R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.try_read_document().transpose()
    }
}
