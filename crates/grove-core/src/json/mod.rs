//! JSON backend: the reference archive implementations plus string-level
//! entry points.
//!
//! The wire format is standard JSON, valid UTF-8. Pretty output uses
//! two-space indentation and `\n` line breaks; compact output contains no
//! insignificant whitespace.

mod reader;
mod writer;

pub use reader::JsonReader;
pub use writer::JsonWriter;

use serde_json::Value;

use crate::de::{Decode, Deserializer};
use crate::error::Result;
use crate::ser::{Encode, Serializer};

/// Encode a value as compact JSON text.
pub fn to_string<T: Encode + ?Sized>(value: &T) -> Result<String> {
    write_with(JsonWriter::new(), value)
}

/// Encode a value as pretty JSON text (two-space indent).
pub fn to_string_pretty<T: Encode + ?Sized>(value: &T) -> Result<String> {
    write_with(JsonWriter::pretty(), value)
}

fn write_with<T: Encode + ?Sized>(writer: JsonWriter, value: &T) -> Result<String> {
    let ser = Serializer::new(writer);
    value.encode(ser.root())?;
    Ok(ser.finish()?.into_string())
}

/// Decode a value from JSON text.
pub fn from_str<T: Decode>(json: &str) -> Result<T> {
    let doc: Value = serde_json::from_str(json)?;
    from_value(&doc)
}

/// Decode a value from an already-parsed JSON tree.
pub fn from_value<T: Decode>(doc: &Value) -> Result<T> {
    let de = Deserializer::new(JsonReader::new(doc));
    let value = T::decode(de.root())?;
    de.finish()?;
    Ok(value)
}
