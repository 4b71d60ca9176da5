//! Output buffer used by the encoder.

use byteorder::{LittleEndian, WriteBytesExt};

const INITIAL_CAPACITY: usize = 256;

/// Writer appends little-endian BSON primitives to a growing buffer.
///
/// Writes into a `Vec<u8>` cannot fail, so none of these return a `Result`.
#[derive(Debug, Clone)]
pub struct Writer {
    buffer: Vec<u8>,
}

impl Writer {
    /// Creates a new writer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Creates a new writer with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Returns the current length of the buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the encoded bytes as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consumes the writer and returns the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    /// Resets the writer for reuse.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Writes a raw byte.
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Writes a 32-bit signed integer (little-endian).
    pub fn write_i32_le(&mut self, value: i32) {
        // Vec<u8> as io::Write is infallible
        let _ = self.buffer.write_i32::<LittleEndian>(value);
    }

    /// Writes a 64-bit signed integer (little-endian).
    pub fn write_i64_le(&mut self, value: i64) {
        let _ = self.buffer.write_i64::<LittleEndian>(value);
    }

    /// Writes a 64-bit float (IEEE 754, little-endian).
    pub fn write_f64_le(&mut self, value: f64) {
        let _ = self.buffer.write_f64::<LittleEndian>(value);
    }

    /// Writes a NUL-terminated key.
    pub fn write_cstring(&mut self, value: &str) {
        self.buffer.extend_from_slice(value.as_bytes());
        self.buffer.push(0);
    }

    /// Writes a string payload: length (including NUL), bytes, NUL.
    pub fn write_string(&mut self, value: &str) {
        self.write_i32_le(value.len() as i32 + 1);
        self.write_cstring(value);
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_integers() {
        let mut writer = Writer::new();
        writer.write_i32_le(12345);
        assert_eq!(writer.as_bytes(), &[0x39, 0x30, 0, 0]);

        let mut writer = Writer::new();
        writer.write_i64_le(300);
        assert_eq!(writer.as_bytes(), &[0x2C, 0x01, 0, 0, 0, 0, 0, 0]);

        let mut writer = Writer::new();
        writer.write_i32_le(-1);
        assert_eq!(writer.as_bytes(), &[0xFF; 4]);
    }

    #[test]
    fn test_write_double() {
        let mut writer = Writer::new();
        writer.write_f64_le(-123.456);
        assert_eq!(
            writer.as_bytes(),
            &[0x77, 0xBE, 0x9F, 0x1A, 0x2F, 0xDD, 0x5E, 0xC0]
        );
    }

    #[test]
    fn test_write_string() {
        let mut writer = Writer::new();
        writer.write_string("hello");
        assert_eq!(
            writer.as_bytes(),
            &[6, 0, 0, 0, b'h', b'e', b'l', b'l', b'o', 0]
        );

        let mut writer = Writer::new();
        writer.write_string("");
        assert_eq!(writer.as_bytes(), &[1, 0, 0, 0, 0]);
    }
}
