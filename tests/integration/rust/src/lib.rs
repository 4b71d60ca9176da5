//! bsonlite interoperability tests.
//!
//! These tests check that bsonlite produces byte layouts the reference `bson`
//! crate accepts, and decodes what that crate produces.

pub mod interop;

#[cfg(test)]
mod interop_test;

pub use interop::*;
