//! Tagged element values.

use crate::array::Array;
use crate::document::Document;
use crate::types::{
    BsonBoolean, ElementType, SIZE_BOOLEAN, SIZE_DOUBLE, SIZE_INT32, SIZE_INT64, STRING_OVERHEAD,
};

/// A single typed value stored in a [`Document`] or [`Array`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Double(f64),
    /// Owned text. May contain NUL bytes; the wire length covers them.
    String(String),
    Document(Document),
    Array(Array),
    Boolean(BsonBoolean),
    Int32(i32),
    Int64(i64),
}

impl Element {
    /// The tag written before this element.
    pub fn element_type(&self) -> ElementType {
        match self {
            Element::Double(_) => ElementType::Double,
            Element::String(_) => ElementType::String,
            Element::Document(_) => ElementType::Document,
            Element::Array(_) => ElementType::Array,
            Element::Boolean(_) => ElementType::Boolean,
            Element::Int32(_) => ElementType::Int32,
            Element::Int64(_) => ElementType::Int64,
        }
    }

    /// Get the type name as a string (for error messages).
    pub fn type_name(&self) -> &'static str {
        self.element_type().name()
    }

    /// Encoded size of the payload, excluding tag and key.
    ///
    /// Constant time for scalars and strings; containers recurse.
    pub fn payload_size(&self) -> usize {
        match self {
            Element::Double(_) => SIZE_DOUBLE,
            Element::String(s) => STRING_OVERHEAD + s.len(),
            Element::Document(doc) => doc.size(),
            Element::Array(arr) => arr.size(),
            Element::Boolean(_) => SIZE_BOOLEAN,
            Element::Int32(_) => SIZE_INT32,
            Element::Int64(_) => SIZE_INT64,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Element::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Element::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Element::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<BsonBoolean> {
        match self {
            Element::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Element::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Element::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Element::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Element::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::Double(value)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        Element::String(value.to_owned())
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Element::String(value)
    }
}

impl From<Document> for Element {
    fn from(value: Document) -> Self {
        Element::Document(value)
    }
}

impl From<Array> for Element {
    fn from(value: Array) -> Self {
        Element::Array(value)
    }
}

impl From<bool> for Element {
    fn from(value: bool) -> Self {
        Element::Boolean(value.into())
    }
}

impl From<BsonBoolean> for Element {
    fn from(value: BsonBoolean) -> Self {
        Element::Boolean(value)
    }
}

impl From<i32> for Element {
    fn from(value: i32) -> Self {
        Element::Int32(value)
    }
}

impl From<i64> for Element {
    fn from(value: i64) -> Self {
        Element::Int64(value)
    }
}
