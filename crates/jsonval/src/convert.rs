use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::{error::AccessError, number::Number, value::Value};

/// Total conversion into a [`Value`]; cannot fail.
///
/// Implemented for native strings, booleans, every fixed-width and
/// pointer-width integer, floats (non-finite becomes `Null`), [`Number`],
/// `Value` itself, and containers of lossless elements, which compose
/// into arrays and objects.
pub trait IntoJson {
    fn into_json(self) -> Value;
}

/// Fallible conversion into a [`Value`].
///
/// The general tier of the construction protocol: containers reject the
/// whole conversion as soon as one element fails, and downstream types
/// whose conversion can fail plug in here. Every lossless type also
/// implements this trait by delegation, so generic code can take the
/// `TryIntoJson` bound and accept both tiers.
pub trait TryIntoJson {
    /// Performs the conversion.
    ///
    /// # Errors
    ///
    /// Returns the failing element's own error; containers stop at the
    /// first element that does not convert.
    fn try_into_json(self) -> Result<Value, AccessError>;
}

impl IntoJson for Value {
    fn into_json(self) -> Value {
        self
    }
}

impl IntoJson for Number {
    fn into_json(self) -> Value {
        Value::Number(self)
    }
}

impl IntoJson for bool {
    fn into_json(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoJson for String {
    fn into_json(self) -> Value {
        Value::String(self)
    }
}

impl IntoJson for &str {
    fn into_json(self) -> Value {
        Value::String(self.to_owned())
    }
}

macro_rules! impl_lossless_integer {
    ($($ty:ty),*) => {
        $(
            impl IntoJson for $ty {
                fn into_json(self) -> Value {
                    Value::Number(Number::from(self))
                }
            }
        )*
    };
}

impl_lossless_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoJson for f64 {
    /// Non-finite values become `Null`; JSON has no literal for them.
    fn into_json(self) -> Value {
        Number::from_f64(self).map_or(Value::Null, Value::Number)
    }
}

impl IntoJson for f32 {
    /// Non-finite values become `Null`; JSON has no literal for them.
    fn into_json(self) -> Value {
        Number::from_f32(self).map_or(Value::Null, Value::Number)
    }
}

impl<T: IntoJson> IntoJson for Option<T> {
    fn into_json(self) -> Value {
        self.map_or(Value::Null, IntoJson::into_json)
    }
}

impl<T: IntoJson> IntoJson for Vec<T> {
    fn into_json(self) -> Value {
        Value::Array(self.into_iter().map(IntoJson::into_json).collect())
    }
}

/// Pair order follows the map's iteration order.
impl<T: IntoJson> IntoJson for AHashMap<String, T> {
    fn into_json(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(key, value)| (key, value.into_json()))
                .collect(),
        )
    }
}

impl<T: IntoJson> IntoJson for BTreeMap<String, T> {
    fn into_json(self) -> Value {
        Value::Object(
            self.into_iter()
                .map(|(key, value)| (key, value.into_json()))
                .collect(),
        )
    }
}

// Coherence rules out a blanket `IntoJson -> TryIntoJson` impl next to
// the fallible container impls below, so the lossless types get their
// delegating impls stamped here instead.
macro_rules! impl_fallible_by_delegation {
    ($($ty:ty),*) => {
        $(
            impl TryIntoJson for $ty {
                fn try_into_json(self) -> Result<Value, AccessError> {
                    Ok(self.into_json())
                }
            }
        )*
    };
}

impl_fallible_by_delegation!(
    Value, Number, bool, String, &str, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32,
    f64
);

impl<T: TryIntoJson> TryIntoJson for Option<T> {
    fn try_into_json(self) -> Result<Value, AccessError> {
        self.map_or(Ok(Value::Null), TryIntoJson::try_into_json)
    }
}

impl<T: TryIntoJson> TryIntoJson for Vec<T> {
    fn try_into_json(self) -> Result<Value, AccessError> {
        self.into_iter()
            .map(TryIntoJson::try_into_json)
            .collect::<Result<_, _>>()
            .map(Value::Array)
    }
}

impl<T: TryIntoJson> TryIntoJson for AHashMap<String, T> {
    fn try_into_json(self) -> Result<Value, AccessError> {
        self.into_iter()
            .map(|(key, value)| value.try_into_json().map(|value| (key, value)))
            .collect::<Result<_, _>>()
            .map(Value::Object)
    }
}

impl<T: TryIntoJson> TryIntoJson for BTreeMap<String, T> {
    fn try_into_json(self) -> Result<Value, AccessError> {
        self.into_iter()
            .map(|(key, value)| value.try_into_json().map(|value| (key, value)))
            .collect::<Result<_, _>>()
            .map(Value::Object)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Value {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(flag) => Value::Bool(flag),
            serde_json::Value::Number(number) => {
                Value::Number(Number::from_digits_unchecked(number.to_string()))
            }
            serde_json::Value::String(text) => Value::String(text),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Duplicate keys collapse with last-occurrence-wins because the codec's
/// map type deduplicates; duplicate-preserving output goes through
/// [`to_string`](crate::to_string) instead.
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> serde_json::Value {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(flag) => serde_json::Value::Bool(flag),
            Value::Number(number) => serde_json::Value::Number(
                number
                    .digits()
                    .parse()
                    .expect("digit strings are valid JSON number literals"),
            ),
            Value::String(text) => serde_json::Value::String(text),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(pairs) => {
                let mut entries = serde_json::Map::new();
                for (key, value) in pairs {
                    entries.insert(key, value.into());
                }
                serde_json::Value::Object(entries)
            }
        }
    }
}
