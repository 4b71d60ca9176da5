//! Ordered element sequence.

use crate::document::Document;
use crate::element::Element;
use crate::error::Result;
use crate::types::{index_key_size, BsonBoolean, DOCUMENT_OVERHEAD, ELEMENT_OVERHEAD};
use crate::{decode, encode};

const DEFAULT_CAPACITY: usize = 10;

/// A BSON array.
///
/// Elements are addressed by position. The decimal keys ("0", "1", ...) only
/// exist in the encoded form.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    elements: Vec<Element>,
}

impl Array {
    /// Creates an empty array with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with room for `capacity` elements. The
    /// capacity doubles whenever it runs out.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Appends `value`.
    pub fn add(&mut self, value: impl Into<Element>) {
        self.elements.push(value.into());
    }

    pub fn add_int32(&mut self, value: i32) {
        self.add(value);
    }

    pub fn add_int64(&mut self, value: i64) {
        self.add(value);
    }

    pub fn add_double(&mut self, value: f64) {
        self.add(value);
    }

    pub fn add_string(&mut self, value: &str) {
        self.add(value);
    }

    pub fn add_bool(&mut self, value: bool) {
        self.add(value);
    }

    /// Moves `child` to the end of this array.
    pub fn add_object(&mut self, child: Document) {
        self.add(Element::Document(child));
    }

    /// Moves `child` to the end of this array.
    pub fn add_array(&mut self, child: Array) {
        self.add(Element::Array(child));
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.count()`.
    pub fn get(&self, index: usize) -> &Element {
        match self.elements.get(index) {
            Some(element) => element,
            None => panic!(
                "array index {} out of range (count={})",
                index,
                self.elements.len()
            ),
        }
    }

    /// Returns the element at `index`, or `None` when out of range.
    pub fn try_get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    // Typed accessors panic out of range like `get`, but answer a type
    // mismatch with a default.

    pub fn get_int32(&self, index: usize) -> i32 {
        self.get(index).as_i32().unwrap_or(0)
    }

    pub fn get_int64(&self, index: usize) -> i64 {
        self.get(index).as_i64().unwrap_or(0)
    }

    pub fn get_double(&self, index: usize) -> f64 {
        self.get(index).as_f64().unwrap_or(0.0)
    }

    pub fn get_bool(&self, index: usize) -> BsonBoolean {
        self.get(index).as_bool().unwrap_or(BsonBoolean::Invalid)
    }

    pub fn get_string(&self, index: usize) -> Option<&str> {
        self.get(index).as_str()
    }

    pub fn get_object(&self, index: usize) -> Option<&Document> {
        self.get(index).as_document()
    }

    pub fn get_array(&self, index: usize) -> Option<&Array> {
        self.get(index).as_array()
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.elements.len()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Drops every element, nested containers included.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Encoded length in bytes, length field and terminator included.
    pub fn size(&self) -> usize {
        DOCUMENT_OVERHEAD
            + self
                .elements
                .iter()
                .enumerate()
                .map(|(i, element)| ELEMENT_OVERHEAD + index_key_size(i) + element.payload_size())
                .sum::<usize>()
    }

    /// Encodes this array as a top-level BSON array document.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode::array_to_bytes(self)
    }

    /// Decodes an array document from the front of `bytes`. Keys are
    /// ignored; elements keep their order of appearance.
    pub fn from_bytes_len(bytes: &[u8]) -> Result<(Array, usize)> {
        decode::array_from_bytes_len(bytes)
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for Array {
    type Item = Element;
    type IntoIter = std::vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<E: Into<Element>> FromIterator<E> for Array {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().map(Into::into).collect(),
        }
    }
}
