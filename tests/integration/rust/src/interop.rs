//! Shared fixtures for the interoperability tests.

use bsonlite::{Array, Document, Result};
use serde::{Deserialize, Serialize};

/// Flat record covering every scalar type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarTypes {
    pub int32_val: i32,
    pub int64_val: i64,
    pub double_val: f64,
    pub bool_val: bool,
    pub string_val: String,
}

/// Record with an embedded document and an embedded array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nested {
    pub testint: i32,
    pub testobj: Inner,
    pub float: f64,
    #[serde(rename = "boolValue")]
    pub bool_value: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inner {
    pub string_test: String,
    pub arr: Vec<i64>,
}

pub fn sample_scalars() -> ScalarTypes {
    ScalarTypes {
        int32_val: i32::MIN,
        int64_val: i64::MAX,
        double_val: 2.718281828459045,
        bool_val: true,
        string_val: "hello, bson!".to_string(),
    }
}

pub fn sample_nested() -> Nested {
    Nested {
        testint: 12345,
        testobj: Inner {
            string_test: "ABCDEFGabcdefg".to_string(),
            arr: vec![100, 200, 300],
        },
        float: -123.456,
        bool_value: true,
    }
}

/// Builds the bsonlite equivalent of `scalars`.
pub fn scalars_document(scalars: &ScalarTypes) -> Result<Document> {
    let mut doc = Document::new();
    doc.put_int32("int32_val", scalars.int32_val)?;
    doc.put_int64("int64_val", scalars.int64_val)?;
    doc.put_double("double_val", scalars.double_val)?;
    doc.put_bool("bool_val", scalars.bool_val)?;
    doc.put_string("string_val", &scalars.string_val)?;
    Ok(doc)
}

/// Builds the bsonlite equivalent of `nested`, moving the sub-document and
/// array into their parents.
pub fn nested_document(nested: &Nested) -> Result<Document> {
    let mut arr = Array::with_capacity(nested.testobj.arr.len());
    for value in &nested.testobj.arr {
        arr.add_int64(*value);
    }

    let mut inner = Document::new();
    inner.put_string("string_test", &nested.testobj.string_test)?;
    inner.put_array("arr", arr)?;

    let mut doc = Document::new();
    doc.put_int32("testint", nested.testint)?;
    doc.put_object("testobj", inner)?;
    doc.put_double("float", nested.float)?;
    doc.put_bool("boolValue", nested.bool_value)?;
    Ok(doc)
}

/// Reads a bsonlite document back into a `Nested`, using the strict
/// accessors so a missing or mistyped field is an error.
pub fn nested_from_document(doc: &Document) -> Result<Nested> {
    let inner = doc.try_get_object("testobj")?;
    let arr = inner.try_get_array("arr")?;
    Ok(Nested {
        testint: doc.try_get_int32("testint")?,
        testobj: Inner {
            string_test: inner.try_get_string("string_test")?.to_string(),
            arr: (0..arr.count()).map(|i| arr.get_int64(i)).collect(),
        },
        float: doc.try_get_double("float")?,
        bool_value: doc.try_get_bool("boolValue")?.as_bool().unwrap_or(false),
    })
}
