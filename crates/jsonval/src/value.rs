#![allow(clippy::missing_errors_doc)]

use std::{collections::hash_map::Entry, mem, str::FromStr};

use ahash::AHashMap;

use crate::{
    error::{AccessError, Kind},
    number::Number,
};

/// Any JSON value.
///
/// Objects are ordered sequences of key-value pairs: insertion order is
/// preserved, duplicate keys are legal, and equality is defined over the
/// pair sequence (order-sensitive). A deduplicated map view is derived on
/// demand via [`to_map`], never stored. Numbers carry their verbatim
/// literal text ([`Number`]), so trees round-trip through JSON text
/// without precision loss and the whole type is `Eq + Hash + Ord`
/// (ordering is structural, by variant then payload, not numeric).
///
/// Trees are immutable after construction; there are no in-place setters,
/// so a constructed tree can be shared freely across threads.
///
/// [`to_map`]: Value::to_map
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    String(String),
    Number(Number),
    Bool(bool),
    Object(Vec<(String, Value)>),
    Array(Vec<Value>),
    #[default]
    Null,
}

const _: () = const {
    assert!(mem::size_of::<Value>() <= 32);
};

impl Value {
    /// Builds an object from key-value pairs, keeping order and
    /// duplicates.
    pub fn object<K, I>(pairs: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builds an array from a sequence of values.
    pub fn array<I: IntoIterator<Item = Value>>(items: I) -> Value {
        Value::Array(items.into_iter().collect())
    }

    /// Builds a number value from a JSON number literal.
    ///
    /// Equivalent to [`Number::from_digits`] wrapped into a value.
    pub fn from_digits(digits: impl Into<String>) -> Result<Value, AccessError> {
        Number::from_digits(digits).map(Value::Number)
    }

    /// The shape tag of this value.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Bool(_) => Kind::Bool,
            Value::Object(_) => Kind::Object,
            Value::Array(_) => Kind::Array,
            Value::Null => Kind::Null,
        }
    }

    /// Whether this value is JSON `null`. Distinct from an absent key,
    /// which surfaces as [`AccessError::MissingValue`] on lookup.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrows the text of a string value.
    pub fn as_str(&self) -> Result<&str, AccessError> {
        match self {
            Value::String(text) => Ok(text),
            other => Err(AccessError::mismatch("string", other.kind())),
        }
    }

    /// Reads a boolean value.
    pub fn as_bool(&self) -> Result<bool, AccessError> {
        match self {
            Value::Bool(flag) => Ok(*flag),
            other => Err(AccessError::mismatch("boolean", other.kind())),
        }
    }

    /// Borrows a number value.
    pub fn as_number(&self) -> Result<&Number, AccessError> {
        match self {
            Value::Number(number) => Ok(number),
            other => Err(AccessError::mismatch("number", other.kind())),
        }
    }

    /// The verbatim digit text of a number value.
    pub fn digits(&self) -> Result<&str, AccessError> {
        self.as_number().map(Number::digits)
    }

    /// Parses a number value into any type with a string parser.
    ///
    /// Fails with `TypeMismatch` both when the variant is not a number
    /// and when the digits are not representable in `T`.
    pub fn to_number<T: FromStr>(&self) -> Result<T, AccessError> {
        self.as_number()?.parse()
    }

    /// Reads a number value as `i64`.
    pub fn as_i64(&self) -> Result<i64, AccessError> {
        self.to_number()
    }

    /// Reads a number value as `u64`.
    pub fn as_u64(&self) -> Result<u64, AccessError> {
        self.to_number()
    }

    /// Reads a number value as `f64`.
    pub fn as_f64(&self) -> Result<f64, AccessError> {
        self.to_number()
    }

    /// Borrows the pairs of an object value in insertion order,
    /// duplicates included.
    pub fn as_object(&self) -> Result<&[(String, Value)], AccessError> {
        match self {
            Value::Object(pairs) => Ok(pairs),
            other => Err(AccessError::mismatch("object", other.kind())),
        }
    }

    /// Borrows the elements of an array value.
    pub fn as_array(&self) -> Result<&[Value], AccessError> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(AccessError::mismatch("array", other.kind())),
        }
    }

    /// Returns the first value stored under `key`.
    ///
    /// Duplicate keys resolve to the first occurrence. An absent key is
    /// [`AccessError::MissingValue`]; a non-object is `TypeMismatch`.
    pub fn get(&self, key: &str) -> Result<&Value, AccessError> {
        self.as_object()?
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
            .ok_or(AccessError::MissingValue)
    }

    /// Returns every value stored under `key` in original order.
    ///
    /// An empty result is not an error; only a non-object fails.
    pub fn get_all<'v>(
        &'v self,
        key: &'v str,
    ) -> Result<impl Iterator<Item = &'v Value> + 'v, AccessError> {
        Ok(self
            .as_object()?
            .iter()
            .filter_map(move |(k, v)| (k == key).then_some(v)))
    }

    /// Returns the array element at `index`.
    ///
    /// Out-of-range is [`AccessError::MissingValue`], keeping "right
    /// shape, bad index" apart from the `TypeMismatch` a non-array
    /// raises.
    pub fn at(&self, index: usize) -> Result<&Value, AccessError> {
        self.as_array()?.get(index).ok_or(AccessError::MissingValue)
    }

    /// Number of pairs in an object (duplicates counted) or elements in
    /// an array. Any other variant is `TypeMismatch`.
    pub fn len(&self) -> Result<usize, AccessError> {
        match self {
            Value::Object(pairs) => Ok(pairs.len()),
            Value::Array(items) => Ok(items.len()),
            other => Err(AccessError::mismatch("object or array", other.kind())),
        }
    }

    /// Whether an object or array has no entries.
    pub fn is_empty(&self) -> Result<bool, AccessError> {
        self.len().map(|len| len == 0)
    }

    /// Collapses an object into a unique-key map; the last occurrence of
    /// each key wins.
    pub fn to_map(&self) -> Result<AHashMap<String, Value>, AccessError> {
        self.to_map_with(|_, incoming| incoming)
    }

    /// Collapses an object into a unique-key map with an explicit
    /// conflict resolver called as `resolve(existing, incoming)` for
    /// every repeated key.
    pub fn to_map_with<F>(&self, mut resolve: F) -> Result<AHashMap<String, Value>, AccessError>
    where
        F: FnMut(Value, Value) -> Value,
    {
        let pairs = self.as_object()?;
        let mut map = AHashMap::with_capacity(pairs.len());
        for (key, value) in pairs {
            match map.entry(key.clone()) {
                Entry::Occupied(mut slot) => {
                    let existing = mem::replace(slot.get_mut(), Value::Null);
                    *slot.get_mut() = resolve(existing, value.clone());
                }
                Entry::Vacant(slot) => {
                    slot.insert(value.clone());
                }
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::convert::IntoJson;

    fn sample_object() -> Value {
        Value::object([
            ("a", 1u8.into_json()),
            ("b", "text".into_json()),
            ("x", 1u8.into_json()),
            ("x", 2u8.into_json()),
        ])
    }

    #[test_case(Value::Number(Number::from(1u8)); "number")]
    #[test_case(Value::Bool(true); "bool")]
    #[test_case(Value::Object(Vec::new()); "object")]
    #[test_case(Value::Array(Vec::new()); "array")]
    #[test_case(Value::Null; "null")]
    fn as_str_mismatches(value: Value) {
        assert!(matches!(
            value.as_str(),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test_case(Value::String("true".into()); "string")]
    #[test_case(Value::Number(Number::from(1u8)); "number")]
    #[test_case(Value::Object(Vec::new()); "object")]
    #[test_case(Value::Array(Vec::new()); "array")]
    #[test_case(Value::Null; "null")]
    fn as_bool_mismatches(value: Value) {
        assert!(matches!(
            value.as_bool(),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test_case(Value::String("1".into()); "string")]
    #[test_case(Value::Bool(true); "bool")]
    #[test_case(Value::Object(Vec::new()); "object")]
    #[test_case(Value::Array(Vec::new()); "array")]
    #[test_case(Value::Null; "null")]
    fn as_number_mismatches(value: Value) {
        assert!(matches!(
            value.as_number(),
            Err(AccessError::TypeMismatch { .. })
        ));
        assert!(matches!(
            value.as_i64(),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test_case(Value::String("{}".into()); "string")]
    #[test_case(Value::Number(Number::from(1u8)); "number")]
    #[test_case(Value::Bool(false); "bool")]
    #[test_case(Value::Array(Vec::new()); "array")]
    #[test_case(Value::Null; "null")]
    fn as_object_mismatches(value: Value) {
        assert!(matches!(
            value.as_object(),
            Err(AccessError::TypeMismatch { .. })
        ));
        assert!(matches!(
            value.get("a"),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test_case(Value::String("[]".into()); "string")]
    #[test_case(Value::Number(Number::from(1u8)); "number")]
    #[test_case(Value::Bool(false); "bool")]
    #[test_case(Value::Object(Vec::new()); "object")]
    #[test_case(Value::Null; "null")]
    fn as_array_mismatches(value: Value) {
        assert!(matches!(
            value.as_array(),
            Err(AccessError::TypeMismatch { .. })
        ));
        assert!(matches!(
            value.at(0),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn accessors_succeed_on_matching_shapes() {
        assert_eq!(Value::String("hi".into()).as_str().expect("string"), "hi");
        assert!(Value::Bool(true).as_bool().expect("bool"));
        assert_eq!(
            Value::Number(Number::from(43u8)).as_i64().expect("number"),
            43
        );
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(false).is_null());
    }

    #[test]
    fn digits_round_trip_through_value() {
        let value = Value::from_digits("36893488147419103232").expect("valid literal");
        assert_eq!(value.digits().expect("number"), "36893488147419103232");
        assert_eq!(value.kind(), Kind::Number);
        assert!(matches!(
            value.as_u64(),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn first_match_wins_on_lookup() {
        let object = sample_object();
        assert_eq!(
            object.get("x").expect("present"),
            &Value::Number(Number::from(1u8))
        );
    }

    #[test]
    fn missing_key_is_missing_value() {
        let object = sample_object();
        assert!(matches!(object.get("c"), Err(AccessError::MissingValue)));
        assert!(object.get("a").is_ok());
    }

    #[test]
    fn get_all_returns_every_match_in_order() {
        let object = sample_object();
        let matches: Vec<_> = object.get_all("x").expect("object").collect();
        assert_eq!(
            matches,
            [
                &Value::Number(Number::from(1u8)),
                &Value::Number(Number::from(2u8))
            ]
        );
        assert_eq!(object.get_all("c").expect("object").count(), 0);
    }

    #[test]
    fn out_of_bounds_is_missing_value() {
        let array = Value::array([1u8.into_json(), 2u8.into_json(), 3u8.into_json()]);
        assert!(array.at(2).is_ok());
        assert!(matches!(array.at(3), Err(AccessError::MissingValue)));
    }

    #[test]
    fn len_counts_pairs_and_elements() {
        assert_eq!(sample_object().len().expect("object"), 4);
        assert_eq!(Value::array([Value::Null]).len().expect("array"), 1);
        assert!(Value::Object(Vec::new()).is_empty().expect("object"));
        assert!(matches!(
            Value::Bool(true).len(),
            Err(AccessError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn collapse_defaults_to_last_wins() {
        let map = sample_object().to_map().expect("object");
        assert_eq!(map.len(), 3);
        assert_eq!(map["x"], Value::Number(Number::from(2u8)));
    }

    #[test]
    fn collapse_with_explicit_resolver() {
        let map = sample_object()
            .to_map_with(|existing, _| existing)
            .expect("object");
        assert_eq!(map["x"], Value::Number(Number::from(1u8)));
    }

    #[test]
    fn equality_is_order_sensitive_for_objects() {
        let ab = Value::object([("a", Value::Null), ("b", Value::Null)]);
        let ba = Value::object([("b", Value::Null), ("a", Value::Null)]);
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn default_is_null() {
        assert_eq!(Value::default(), Value::Null);
    }
}
