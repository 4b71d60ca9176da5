//! Bounds-checked byte cursor used by the decoder.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Reader walks a borrowed byte slice, never past its end.
///
/// A failed read leaves the position where it was.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buffer: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            buffer: data,
            pos: 0,
        }
    }

    /// Returns the current position in the buffer, i.e. bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// Returns true if there is more data to read.
    pub fn has_more(&self) -> bool {
        self.pos < self.buffer.len()
    }

    /// Checks if there are enough bytes available.
    fn check_available(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(Error::buffer_underflow(needed, self.remaining()));
        }
        Ok(())
    }

    /// Reads a raw byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check_available(1)?;
        let value = self.buffer[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads raw bytes.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        self.check_available(length)?;
        let bytes = &self.buffer[self.pos..self.pos + length];
        self.pos += length;
        Ok(bytes)
    }

    /// Reads a 32-bit signed integer (little-endian).
    pub fn read_i32_le(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    /// Reads a 64-bit signed integer (little-endian).
    pub fn read_i64_le(&mut self) -> Result<i64> {
        Ok(LittleEndian::read_i64(self.read_bytes(8)?))
    }

    /// Reads a 64-bit float (IEEE 754, little-endian).
    pub fn read_f64_le(&mut self) -> Result<f64> {
        Ok(LittleEndian::read_f64(self.read_bytes(8)?))
    }

    /// Reads a 32-bit length field without consuming it.
    pub fn peek_i32_le(&self) -> Result<i32> {
        self.check_available(4)?;
        Ok(LittleEndian::read_i32(&self.buffer[self.pos..self.pos + 4]))
    }

    /// Reads a NUL-terminated string, consuming the terminator.
    ///
    /// Fails with an underflow if no NUL occurs before the end of the buffer.
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.buffer[self.pos..];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::buffer_underflow(rest.len() + 1, rest.len()))?;
        let text = std::str::from_utf8(&rest[..nul]).map_err(|_| Error::InvalidUtf8)?;
        self.pos += nul + 1;
        Ok(text.to_owned())
    }

    /// Creates a sub-reader over the next `length` bytes and skips past them.
    pub fn sub_reader(&mut self, length: usize) -> Result<Reader<'a>> {
        self.check_available(length)?;
        let sub = Reader::new(&self.buffer[self.pos..self.pos + length]);
        self.pos += length;
        Ok(sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_i64_le() {
        let mut reader = Reader::new(&[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(reader.read_i64_le().unwrap(), 0);
        assert_eq!(reader.position(), 8);

        let mut reader = Reader::new(&[0x12, 0xA2, 0xBF, 0x82, 0x34, 0xD0, 0x07, 0x73]);
        assert_eq!(reader.read_i64_le().unwrap(), 0x7307D03482BFA212);

        let mut reader = Reader::new(&[0x34, 0xC9, 0x30, 0x74, 0x22, 0x6F, 0xCA, 0xBD]);
        assert_eq!(reader.read_i64_le().unwrap(), -4770878661476693708);

        let mut reader = Reader::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(reader.read_i64_le().unwrap(), i64::MAX);

        let mut reader = Reader::new(&[0xFF; 8]);
        assert_eq!(reader.read_i64_le().unwrap(), -1);

        let mut reader = Reader::new(&[0, 0, 0, 0, 0, 0, 0, 0x80]);
        assert_eq!(reader.read_i64_le().unwrap(), i64::MIN);
    }

    #[test]
    fn test_read_i32_and_f64() {
        let mut reader = Reader::new(&[0x39, 0x30, 0, 0]);
        assert_eq!(reader.read_i32_le().unwrap(), 12345);

        let mut reader = Reader::new(&[0x77, 0xBE, 0x9F, 0x1A, 0x2F, 0xDD, 0x5E, 0xC0]);
        assert_eq!(reader.read_f64_le().unwrap(), -123.456);
    }

    #[test]
    fn test_underflow_leaves_position() {
        let mut reader = Reader::new(&[1, 2, 3]);
        assert_eq!(reader.read_u8().unwrap(), 1);

        let err = reader.read_i32_le().unwrap_err();
        assert!(matches!(
            err,
            Error::BufferUnderflow {
                needed: 4,
                available: 2
            }
        ));
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn test_read_cstring() {
        let mut reader = Reader::new(b"key\0rest");
        assert_eq!(reader.read_cstring().unwrap(), "key");
        assert_eq!(reader.position(), 4);

        let mut reader = Reader::new(b"\0");
        assert_eq!(reader.read_cstring().unwrap(), "");
    }

    #[test]
    fn test_read_cstring_without_nul() {
        let mut reader = Reader::new(b"string_te");
        assert!(reader.read_cstring().unwrap_err().is_truncation());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_cstring_invalid_utf8() {
        let mut reader = Reader::new(&[0xC3, 0x28, 0x00]);
        assert!(matches!(reader.read_cstring(), Err(Error::InvalidUtf8)));
    }

    #[test]
    fn test_peek_does_not_consume() {
        let reader = Reader::new(&[5, 0, 0, 0, 0]);
        assert_eq!(reader.peek_i32_le().unwrap(), 5);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_sub_reader() {
        let mut reader = Reader::new(&[1, 2, 3, 4, 5]);
        let mut sub = reader.sub_reader(3).unwrap();
        assert_eq!(reader.position(), 3);
        assert_eq!(sub.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert!(!sub.has_more());
        assert!(sub.read_u8().is_err());
        assert!(reader.sub_reader(3).is_err());
    }
}
