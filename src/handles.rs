//! Handle table for binding layers.
//!
//! Foreign runtimes cannot hold a `Document` directly, so they hold an opaque
//! handle into a [`Handles`] table instead. Each construction gets its own
//! entry and each entry lives until it is released or moved into a parent.
//! Handles are never reused, so a stale one fails with
//! [`Error::InvalidHandle`] instead of reaching someone else's document.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::array::Array;
use crate::document::{validate_key, Document};
use crate::error::{Error, Result};

/// Opaque reference to a live [`Document`] in a [`Handles`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHandle(u64);

/// Opaque reference to a live [`Array`] in a [`Handles`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayHandle(u64);

impl DocumentHandle {
    /// Raw id, for passing across an FFI boundary.
    pub fn as_raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

impl ArrayHandle {
    /// Raw id, for passing across an FFI boundary.
    pub fn as_raw(self) -> u64 {
        self.0
    }

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

/// Internal data structure holding table state.
struct HandlesInner {
    documents: HashMap<u64, Document>,
    arrays: HashMap<u64, Array>,
    next_id: u64,
}

impl HandlesInner {
    fn allocate(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn document_mut(&mut self, handle: DocumentHandle) -> Result<&mut Document> {
        self.documents
            .get_mut(&handle.0)
            .ok_or(Error::InvalidHandle(handle.0))
    }

    fn array_mut(&mut self, handle: ArrayHandle) -> Result<&mut Array> {
        self.arrays
            .get_mut(&handle.0)
            .ok_or(Error::InvalidHandle(handle.0))
    }

    fn take_document(&mut self, child: DocumentHandle) -> Result<Document> {
        self.documents
            .remove(&child.0)
            .ok_or(Error::InvalidHandle(child.0))
    }

    fn take_array(&mut self, child: ArrayHandle) -> Result<Array> {
        self.arrays
            .remove(&child.0)
            .ok_or(Error::InvalidHandle(child.0))
    }
}

/// Owner-managed collection of live documents and arrays.
///
/// The table is guarded by an `RwLock` so it can be shared, but a single
/// document is still only mutated by one caller at a time.
pub struct Handles {
    inner: RwLock<HandlesInner>,
}

impl Handles {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HandlesInner {
                documents: HashMap::new(),
                arrays: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HandlesInner> {
        // Nothing in the table can be left half-updated by a panic.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HandlesInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds an empty document.
    pub fn create_document(&self) -> DocumentHandle {
        self.insert_document(Document::new())
    }

    /// Adds an existing document.
    pub fn insert_document(&self, doc: Document) -> DocumentHandle {
        let mut inner = self.write();
        let id = inner.allocate();
        inner.documents.insert(id, doc);
        debug!(handle = id, "document handle created");
        DocumentHandle(id)
    }

    /// Adds an empty array with room for `capacity` elements.
    pub fn create_array(&self, capacity: usize) -> ArrayHandle {
        self.insert_array(Array::with_capacity(capacity))
    }

    /// Adds an existing array.
    pub fn insert_array(&self, arr: Array) -> ArrayHandle {
        let mut inner = self.write();
        let id = inner.allocate();
        inner.arrays.insert(id, arr);
        debug!(handle = id, "array handle created");
        ArrayHandle(id)
    }

    /// Runs `f` against the document behind `handle`.
    pub fn with_document<T>(
        &self,
        handle: DocumentHandle,
        f: impl FnOnce(&mut Document) -> T,
    ) -> Result<T> {
        let mut inner = self.write();
        Ok(f(inner.document_mut(handle)?))
    }

    /// Runs `f` against the array behind `handle`.
    pub fn with_array<T>(&self, handle: ArrayHandle, f: impl FnOnce(&mut Array) -> T) -> Result<T> {
        let mut inner = self.write();
        Ok(f(inner.array_mut(handle)?))
    }

    /// Moves document `child` under `key` in `parent`. `child` is no longer
    /// live afterwards.
    ///
    /// Parent, key and child are all checked before anything moves, so a
    /// failed call leaves both entries in place.
    pub fn put_object(&self, parent: DocumentHandle, key: &str, child: DocumentHandle) -> Result<()> {
        if parent == child {
            return Err(Error::custom("cannot put a document into itself"));
        }
        validate_key(key)?;
        let mut inner = self.write();
        inner.document_mut(parent)?;
        let doc = inner.take_document(child)?;
        inner.document_mut(parent)?.put_object(key, doc)?;
        debug!(parent = parent.0, child = child.0, "document moved into parent");
        Ok(())
    }

    /// Moves array `child` under `key` in `parent`.
    pub fn put_array(&self, parent: DocumentHandle, key: &str, child: ArrayHandle) -> Result<()> {
        validate_key(key)?;
        let mut inner = self.write();
        inner.document_mut(parent)?;
        let arr = inner.take_array(child)?;
        inner.document_mut(parent)?.put_array(key, arr)?;
        debug!(parent = parent.0, child = child.0, "array moved into parent");
        Ok(())
    }

    /// Moves document `child` to the end of `parent`.
    pub fn add_object(&self, parent: ArrayHandle, child: DocumentHandle) -> Result<()> {
        let mut inner = self.write();
        inner.array_mut(parent)?;
        let doc = inner.take_document(child)?;
        inner.array_mut(parent)?.add_object(doc);
        Ok(())
    }

    /// Moves array `child` to the end of `parent`.
    pub fn add_array(&self, parent: ArrayHandle, child: ArrayHandle) -> Result<()> {
        if parent == child {
            return Err(Error::custom("cannot add an array to itself"));
        }
        let mut inner = self.write();
        inner.array_mut(parent)?;
        let arr = inner.take_array(child)?;
        inner.array_mut(parent)?.add_array(arr);
        Ok(())
    }

    /// Encodes the document behind `handle`.
    pub fn to_bytes(&self, handle: DocumentHandle) -> Result<Vec<u8>> {
        let inner = self.read();
        inner
            .documents
            .get(&handle.0)
            .map(Document::to_bytes)
            .ok_or(Error::InvalidHandle(handle.0))
    }

    /// Decodes `bytes` into a new entry.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<DocumentHandle> {
        let (doc, _) = Document::from_bytes_len(bytes)?;
        Ok(self.insert_document(doc))
    }

    /// Ends the lifetime of a document, returning it to the caller.
    pub fn release_document(&self, handle: DocumentHandle) -> Result<Document> {
        let doc = self.write().take_document(handle)?;
        debug!(handle = handle.0, "document handle released");
        Ok(doc)
    }

    /// Ends the lifetime of an array, returning it to the caller.
    pub fn release_array(&self, handle: ArrayHandle) -> Result<Array> {
        let arr = self.write().take_array(handle)?;
        debug!(handle = handle.0, "array handle released");
        Ok(arr)
    }

    /// Number of live documents and arrays.
    pub fn live_count(&self) -> usize {
        let inner = self.read();
        inner.documents.len() + inner.arrays.len()
    }
}

impl Default for Handles {
    fn default() -> Self {
        Self::new()
    }
}
