use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{number::Number, value::Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(text) => serializer.serialize_str(text),
            Value::Number(number) => number.serialize(serializer),
            Value::Bool(flag) => serializer.serialize_bool(*flag),
            Value::Object(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (key, value) in pairs {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for Number {
    /// Hands the codec its own precision-preserving number type so the
    /// digits cross the boundary unmodified instead of being narrowed to
    /// a native float or integer.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number: serde_json::Number = self
            .digits()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        number.serialize(serializer)
    }
}

/// Encodes a value as compact JSON text.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn to_string(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Encodes a value as pretty-printed JSON text.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn to_string_pretty(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Encodes a value as JSON bytes.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn to_vec(value: &Value) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(value)
}
