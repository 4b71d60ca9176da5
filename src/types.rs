//! Wire format types and utilities.

/// Largest key, in bytes, a document accepts (the key buffer holds 255 bytes
/// including the terminator).
pub const MAX_KEY_LEN: usize = 254;

/// Length field plus trailing terminator of a document or array.
pub const DOCUMENT_OVERHEAD: usize = 5;

/// Tag byte preceding every element.
pub const ELEMENT_OVERHEAD: usize = 1;

/// Length field plus trailing NUL of a string payload.
pub const STRING_OVERHEAD: usize = 5;

/// Last byte of every document.
pub const DOCUMENT_END: u8 = 0x00;

pub const SIZE_DOUBLE: usize = 8;
pub const SIZE_BOOLEAN: usize = 1;
pub const SIZE_INT32: usize = 4;
pub const SIZE_INT64: usize = 8;

/// Element type tags defined by the BSON format.
///
/// Every tag is recognized, but only `Double`, `String`, `Document`, `Array`,
/// `Boolean`, `Int32` and `Int64` can be encoded or decoded. The rest exist so
/// that a decoder can name what it refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    Double = 0x01,
    String = 0x02,
    Document = 0x03,
    Array = 0x04,
    Binary = 0x05,
    /// Deprecated.
    Undefined = 0x06,
    ObjectId = 0x07,
    Boolean = 0x08,
    DateTime = 0x09,
    Null = 0x0A,
    Regex = 0x0B,
    /// Deprecated.
    DbPointer = 0x0C,
    JsCode = 0x0D,
    /// Deprecated.
    Symbol = 0x0E,
    JsCodeWithScope = 0x0F,
    Int32 = 0x10,
    Timestamp = 0x11,
    Int64 = 0x12,
    Decimal128 = 0x13,
    MaxKey = 0x7F,
    MinKey = 0xFF,
}

impl ElementType {
    /// Converts a tag byte to an ElementType.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(ElementType::Double),
            0x02 => Some(ElementType::String),
            0x03 => Some(ElementType::Document),
            0x04 => Some(ElementType::Array),
            0x05 => Some(ElementType::Binary),
            0x06 => Some(ElementType::Undefined),
            0x07 => Some(ElementType::ObjectId),
            0x08 => Some(ElementType::Boolean),
            0x09 => Some(ElementType::DateTime),
            0x0A => Some(ElementType::Null),
            0x0B => Some(ElementType::Regex),
            0x0C => Some(ElementType::DbPointer),
            0x0D => Some(ElementType::JsCode),
            0x0E => Some(ElementType::Symbol),
            0x0F => Some(ElementType::JsCodeWithScope),
            0x10 => Some(ElementType::Int32),
            0x11 => Some(ElementType::Timestamp),
            0x12 => Some(ElementType::Int64),
            0x13 => Some(ElementType::Decimal128),
            0x7F => Some(ElementType::MaxKey),
            0xFF => Some(ElementType::MinKey),
            _ => None,
        }
    }

    /// Returns true for the types this codec reads and writes.
    pub fn is_supported(self) -> bool {
        matches!(
            self,
            ElementType::Double
                | ElementType::String
                | ElementType::Document
                | ElementType::Array
                | ElementType::Boolean
                | ElementType::Int32
                | ElementType::Int64
        )
    }

    /// Get the type name as a string (for error messages).
    pub fn name(self) -> &'static str {
        match self {
            ElementType::Double => "double",
            ElementType::String => "string",
            ElementType::Document => "document",
            ElementType::Array => "array",
            ElementType::Binary => "binary",
            ElementType::Undefined => "undefined",
            ElementType::ObjectId => "objectId",
            ElementType::Boolean => "boolean",
            ElementType::DateTime => "datetime",
            ElementType::Null => "null",
            ElementType::Regex => "regex",
            ElementType::DbPointer => "dbPointer",
            ElementType::JsCode => "javascript",
            ElementType::Symbol => "symbol",
            ElementType::JsCodeWithScope => "javascriptWithScope",
            ElementType::Int32 => "int32",
            ElementType::Timestamp => "timestamp",
            ElementType::Int64 => "int64",
            ElementType::Decimal128 => "decimal128",
            ElementType::MaxKey => "maxKey",
            ElementType::MinKey => "minKey",
        }
    }
}

/// Boolean as read off the wire.
///
/// `Invalid` is what a decoder produces for a boolean byte other than 0x00 or
/// 0x01, and what the permissive accessors return for a missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BsonBoolean {
    False,
    True,
    Invalid,
}

impl BsonBoolean {
    /// Maps a wire byte to a boolean.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x00 => BsonBoolean::False,
            0x01 => BsonBoolean::True,
            _ => BsonBoolean::Invalid,
        }
    }

    /// Wire byte for this value. `Invalid` is written as false.
    pub fn to_byte(self) -> u8 {
        match self {
            BsonBoolean::True => 0x01,
            BsonBoolean::False | BsonBoolean::Invalid => 0x00,
        }
    }

    /// Returns `Some` for a valid boolean.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            BsonBoolean::True => Some(true),
            BsonBoolean::False => Some(false),
            BsonBoolean::Invalid => None,
        }
    }
}

impl From<bool> for BsonBoolean {
    fn from(value: bool) -> Self {
        if value {
            BsonBoolean::True
        } else {
            BsonBoolean::False
        }
    }
}

/// Encoded size of a cstring key.
#[inline]
pub fn key_size(key: &str) -> usize {
    key.len() + 1
}

/// Encoded size of the decimal key for an array index.
#[inline]
pub fn index_key_size(index: usize) -> usize {
    digits(index) + 1
}

/// Number of decimal digits in `value`.
#[inline]
pub fn digits(mut value: usize) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}
