//! Key/value document.

use std::collections::hash_map::{self, HashMap};

use crate::array::Array;
use crate::element::Element;
use crate::error::{Error, Result};
use crate::types::{key_size, BsonBoolean, DOCUMENT_OVERHEAD, ELEMENT_OVERHEAD, MAX_KEY_LEN};
use crate::{decode, encode};

/// A BSON document: unique keys mapped to [`Element`]s.
///
/// Storage is a `HashMap`, so iteration order (and therefore encode order)
/// follows the map's hashing, not insertion. Decoding externally produced
/// bytes and encoding them again yields the same values but not necessarily
/// the same byte sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: HashMap<String, Element>,
}

/// Checks that `key` can be stored and written as a cstring.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.len() > MAX_KEY_LEN {
        return Err(Error::KeyTooLong {
            len: key.len(),
            max: MAX_KEY_LEN,
        });
    }
    if key.as_bytes().contains(&0) {
        return Err(Error::InvalidKey(key.to_owned()));
    }
    Ok(())
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Fails if the key is longer than [`MAX_KEY_LEN`] or contains NUL; the
    /// document is left unchanged in that case.
    pub fn put(&mut self, key: &str, value: impl Into<Element>) -> Result<()> {
        validate_key(key)?;
        self.entries.insert(key.to_owned(), value.into());
        Ok(())
    }

    pub fn put_int32(&mut self, key: &str, value: i32) -> Result<()> {
        self.put(key, value)
    }

    pub fn put_int64(&mut self, key: &str, value: i64) -> Result<()> {
        self.put(key, value)
    }

    pub fn put_double(&mut self, key: &str, value: f64) -> Result<()> {
        self.put(key, value)
    }

    pub fn put_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.put(key, value)
    }

    pub fn put_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.put(key, value)
    }

    /// Moves `child` into this document under `key`.
    ///
    /// The child's storage now belongs to this document. To keep an empty
    /// placeholder in the caller, pass `std::mem::take(&mut child)`.
    pub fn put_object(&mut self, key: &str, child: Document) -> Result<()> {
        self.put(key, Element::Document(child))
    }

    /// Moves `child` into this document under `key`.
    pub fn put_array(&mut self, key: &str, child: Array) -> Result<()> {
        self.put(key, Element::Array(child))
    }

    /// Returns the element stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Element> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.entries.get_mut(key)
    }

    /// Removes and returns the element stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Element> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every element, nested containers included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // Permissive accessors: absent keys and type mismatches yield a default.

    /// Int32 under `key`, or 0.
    pub fn get_int32(&self, key: &str) -> i32 {
        self.get(key).and_then(Element::as_i32).unwrap_or(0)
    }

    /// Int64 under `key`, or 0.
    pub fn get_int64(&self, key: &str) -> i64 {
        self.get(key).and_then(Element::as_i64).unwrap_or(0)
    }

    /// Double under `key`, or 0.0.
    pub fn get_double(&self, key: &str) -> f64 {
        self.get(key).and_then(Element::as_f64).unwrap_or(0.0)
    }

    /// Boolean under `key`, or [`BsonBoolean::Invalid`].
    pub fn get_bool(&self, key: &str) -> BsonBoolean {
        self.get(key)
            .and_then(Element::as_bool)
            .unwrap_or(BsonBoolean::Invalid)
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Element::as_str)
    }

    pub fn get_object(&self, key: &str) -> Option<&Document> {
        self.get(key).and_then(Element::as_document)
    }

    pub fn get_object_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.get_mut(key).and_then(Element::as_document_mut)
    }

    pub fn get_array(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(Element::as_array)
    }

    pub fn get_array_mut(&mut self, key: &str) -> Option<&mut Array> {
        self.get_mut(key).and_then(Element::as_array_mut)
    }

    // Strict accessors: tell "missing" apart from "wrong type".

    fn try_get_with<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a Element) -> Option<T>,
    ) -> Result<T> {
        let element = self
            .get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))?;
        extract(element).ok_or_else(|| Error::type_mismatch(expected, element.type_name()))
    }

    pub fn try_get_int32(&self, key: &str) -> Result<i32> {
        self.try_get_with(key, "int32", Element::as_i32)
    }

    pub fn try_get_int64(&self, key: &str) -> Result<i64> {
        self.try_get_with(key, "int64", Element::as_i64)
    }

    pub fn try_get_double(&self, key: &str) -> Result<f64> {
        self.try_get_with(key, "double", Element::as_f64)
    }

    pub fn try_get_bool(&self, key: &str) -> Result<BsonBoolean> {
        self.try_get_with(key, "boolean", Element::as_bool)
    }

    pub fn try_get_string(&self, key: &str) -> Result<&str> {
        self.try_get_with(key, "string", Element::as_str)
    }

    pub fn try_get_object(&self, key: &str) -> Result<&Document> {
        self.try_get_with(key, "document", Element::as_document)
    }

    pub fn try_get_array(&self, key: &str) -> Result<&Array> {
        self.try_get_with(key, "array", Element::as_array)
    }

    /// Encoded length in bytes, length field and terminator included.
    pub fn size(&self) -> usize {
        DOCUMENT_OVERHEAD
            + self
                .entries
                .iter()
                .map(|(key, element)| ELEMENT_OVERHEAD + key_size(key) + element.payload_size())
                .sum::<usize>()
    }

    /// Iterates entries in map order. Each call starts a fresh pass.
    pub fn iter(&self) -> Entries<'_> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    /// Iterates keys in map order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Encodes this document.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode::to_bytes(self)
    }

    /// Decodes a document from the front of `bytes`.
    ///
    /// Returns the document and the number of bytes it occupied, which equals
    /// its declared length. Trailing bytes are left for the caller to judge.
    pub fn from_bytes_len(bytes: &[u8]) -> Result<(Document, usize)> {
        decode::from_bytes_len(bytes)
    }

    /// Decodes a document, returning an empty one if the input is malformed.
    pub fn from_bytes(bytes: &[u8]) -> Document {
        decode::from_bytes(bytes)
    }
}

/// Iterator over `(key, element)` pairs of a [`Document`].
pub struct Entries<'a> {
    inner: hash_map::Iter<'a, String, Element>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a str, &'a Element);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Document {
    type Item = (String, Element);
    type IntoIter = hash_map::IntoIter<String, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
