//! BSON encoder.
//!
//! Sizes are computed bottom-up before anything is written, so the output
//! buffer is allocated once and every length prefix is known when it is
//! emitted.

use crate::array::Array;
use crate::document::Document;
use crate::element::Element;
use crate::types::DOCUMENT_END;
use crate::writer::Writer;

/// Encodes `doc` into a new buffer of exactly `doc.size()` bytes.
pub fn to_bytes(doc: &Document) -> Vec<u8> {
    let mut writer = Writer::with_capacity(doc.size());
    write_document(&mut writer, doc);
    writer.into_bytes()
}

/// Encodes `arr` as a standalone array document.
pub fn array_to_bytes(arr: &Array) -> Vec<u8> {
    let mut writer = Writer::with_capacity(arr.size());
    write_array(&mut writer, arr);
    writer.into_bytes()
}

/// Appends `doc` to `writer`.
pub fn write_document(writer: &mut Writer, doc: &Document) {
    writer.write_i32_le(doc.size() as i32);
    for (key, element) in doc {
        write_element(writer, key, element);
    }
    writer.write_u8(DOCUMENT_END);
}

/// Appends `arr` to `writer`, keyed by decimal index.
pub fn write_array(writer: &mut Writer, arr: &Array) {
    writer.write_i32_le(arr.size() as i32);
    let mut index_key = itoa::Buffer::new();
    for (index, element) in arr.iter().enumerate() {
        write_element(writer, index_key.format(index), element);
    }
    writer.write_u8(DOCUMENT_END);
}

fn write_element(writer: &mut Writer, key: &str, element: &Element) {
    writer.write_u8(element.element_type() as u8);
    writer.write_cstring(key);
    match element {
        Element::Double(v) => writer.write_f64_le(*v),
        Element::String(s) => writer.write_string(s),
        Element::Document(doc) => write_document(writer, doc),
        Element::Array(arr) => write_array(writer, arr),
        Element::Boolean(b) => writer.write_u8(b.to_byte()),
        Element::Int32(v) => writer.write_i32_le(*v),
        Element::Int64(v) => writer.write_i64_le(*v),
    }
}
