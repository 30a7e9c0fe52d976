use core::fmt;

use ahash::AHashSet;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::value::RawValue;

use crate::{
    error::{DecodeError, LazyPath},
    number::{self, Number},
    value::Value,
};

/// Key under which the codec smuggles verbatim number text through the
/// visitor interface when `arbitrary_precision` is enabled.
const NUMBER_TOKEN: &str = "$serde_json::private::Number";

/// Matches the underlying parser's own recursion limit.
const DEFAULT_MAX_DEPTH: usize = 128;

/// How the text decoding entry points treat repeated keys within one
/// object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateKeys {
    /// Keep every pair in encounter order.
    #[default]
    Preserve,
    /// Fail decoding with [`DecodeError::DuplicateKey`].
    Reject,
}

/// Configuration for [`from_str_with`], [`from_slice_with`], and
/// [`from_raw_with`].
#[derive(Debug, Clone, Copy)]
pub struct DecodeOptions {
    duplicate_keys: DuplicateKeys,
    max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            duplicate_keys: DuplicateKeys::Preserve,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the duplicate-key policy.
    #[must_use]
    pub fn duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Sets the maximum value-nesting depth; the document root is depth
    /// one. The underlying parser additionally enforces its own limit of
    /// 128 while scanning the input.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

/// Decodes a JSON document with default options.
///
/// # Errors
///
/// Returns an error if:
/// - The input is not syntactically valid JSON
/// - Nesting exceeds the default depth limit
pub fn from_str(input: &str) -> Result<Value, DecodeError> {
    from_str_with(input, DecodeOptions::default())
}

/// Decodes a JSON document with explicit options.
///
/// # Errors
///
/// Returns an error if:
/// - The input is not syntactically valid JSON
/// - An object repeats a key under [`DuplicateKeys::Reject`]
/// - Nesting exceeds the configured depth limit
pub fn from_str_with(input: &str, options: DecodeOptions) -> Result<Value, DecodeError> {
    let raw: &RawValue = serde_json::from_str(input).map_err(DecodeError::Syntax)?;
    from_raw_with(raw, options)
}

/// Decodes a JSON document from bytes with default options.
///
/// # Errors
///
/// See [`from_str`].
pub fn from_slice(input: &[u8]) -> Result<Value, DecodeError> {
    from_slice_with(input, DecodeOptions::default())
}

/// Decodes a JSON document from bytes with explicit options.
///
/// # Errors
///
/// See [`from_str_with`].
pub fn from_slice_with(input: &[u8], options: DecodeOptions) -> Result<Value, DecodeError> {
    let raw: &RawValue = serde_json::from_slice(input).map_err(DecodeError::Syntax)?;
    from_raw_with(raw, options)
}

/// Decodes an already-scanned raw span with default options.
///
/// # Errors
///
/// See [`from_str`].
pub fn from_raw(raw: &RawValue) -> Result<Value, DecodeError> {
    from_raw_with(raw, DecodeOptions::default())
}

/// Decodes an already-scanned raw span with explicit options.
///
/// # Errors
///
/// See [`from_str_with`].
pub fn from_raw_with(raw: &RawValue, options: DecodeOptions) -> Result<Value, DecodeError> {
    decode_raw(raw, &LazyPath::root(), 1, &options)
}

/// Outcome of one shape candidate: either "not this shape, try the
/// next", or a hard failure that aborts the whole decode.
enum Trial {
    Mismatch,
    Fatal(DecodeError),
}

fn classify(error: serde_json::Error) -> Trial {
    match error.classify() {
        serde_json::error::Category::Data => Trial::Mismatch,
        _ => Trial::Fatal(DecodeError::Syntax(error)),
    }
}

/// One shape candidate run against the cursor. Scalar candidates ignore
/// the recursion context.
type Candidate = fn(&RawValue, &LazyPath<'_>, usize, &DecodeOptions) -> Result<Value, Trial>;

/// Scalars have single-token signatures and are cheap to rule out;
/// object versus array disambiguation is structural and comes last.
const CANDIDATES: [Candidate; 6] = [
    decode_null,
    decode_string,
    decode_number,
    decode_bool,
    decode_object,
    decode_array,
];

fn decode_raw(
    raw: &RawValue,
    path: &LazyPath<'_>,
    depth: usize,
    options: &DecodeOptions,
) -> Result<Value, DecodeError> {
    if depth > options.max_depth {
        return Err(DecodeError::DepthLimit {
            path: path.to_path(),
        });
    }
    for candidate in CANDIDATES {
        match candidate(raw, path, depth, options) {
            Ok(value) => return Ok(value),
            Err(Trial::Mismatch) => {}
            Err(Trial::Fatal(error)) => return Err(error),
        }
    }
    Err(DecodeError::UnrecognizedShape {
        path: path.to_path(),
    })
}

fn decode_null(
    raw: &RawValue,
    _path: &LazyPath<'_>,
    _depth: usize,
    _options: &DecodeOptions,
) -> Result<Value, Trial> {
    serde_json::from_str::<()>(raw.get())
        .map(|()| Value::Null)
        .map_err(classify)
}

fn decode_string(
    raw: &RawValue,
    _path: &LazyPath<'_>,
    _depth: usize,
    _options: &DecodeOptions,
) -> Result<Value, Trial> {
    serde_json::from_str(raw.get())
        .map(Value::String)
        .map_err(classify)
}

fn decode_number(
    raw: &RawValue,
    _path: &LazyPath<'_>,
    _depth: usize,
    _options: &DecodeOptions,
) -> Result<Value, Trial> {
    serde_json::from_str::<serde_json::Number>(raw.get())
        .map(|number| Value::Number(Number::from_digits_unchecked(number.to_string())))
        .map_err(classify)
}

fn decode_bool(
    raw: &RawValue,
    _path: &LazyPath<'_>,
    _depth: usize,
    _options: &DecodeOptions,
) -> Result<Value, Trial> {
    serde_json::from_str(raw.get())
        .map(Value::Bool)
        .map_err(classify)
}

fn decode_object(
    raw: &RawValue,
    path: &LazyPath<'_>,
    depth: usize,
    options: &DecodeOptions,
) -> Result<Value, Trial> {
    let RawEntries(entries) = serde_json::from_str(raw.get()).map_err(classify)?;
    let mut seen = match options.duplicate_keys {
        DuplicateKeys::Reject => Some(AHashSet::with_capacity(entries.len())),
        DuplicateKeys::Preserve => None,
    };
    let mut pairs = Vec::with_capacity(entries.len());
    for (key, child) in entries {
        if let Some(seen) = &mut seen {
            if !seen.insert(key.clone()) {
                return Err(Trial::Fatal(DecodeError::DuplicateKey {
                    path: path.to_path(),
                    key,
                }));
            }
        }
        let child_path = path.key(&key);
        let value = decode_raw(child, &child_path, depth + 1, options).map_err(Trial::Fatal)?;
        pairs.push((key, value));
    }
    Ok(Value::Object(pairs))
}

fn decode_array(
    raw: &RawValue,
    path: &LazyPath<'_>,
    depth: usize,
    options: &DecodeOptions,
) -> Result<Value, Trial> {
    let children: Vec<&RawValue> = serde_json::from_str(raw.get()).map_err(classify)?;
    let mut items = Vec::with_capacity(children.len());
    for (index, child) in children.into_iter().enumerate() {
        let child_path = path.index(index);
        items.push(decode_raw(child, &child_path, depth + 1, options).map_err(Trial::Fatal)?);
    }
    Ok(Value::Array(items))
}

/// Keyed-container entries with their values left unscanned, in
/// encounter order, duplicates preserved.
struct RawEntries<'a>(Vec<(String, &'a RawValue)>);

impl<'de> Deserialize<'de> for RawEntries<'de> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries<'de>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(value)))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        Ok(Value::Number(Number::from(value)))
    }

    fn visit_i128<E>(self, value: i128) -> Result<Value, E> {
        let mut buffer = itoa::Buffer::new();
        Ok(Value::Number(Number::from_digits_unchecked(
            buffer.format(value).to_owned(),
        )))
    }

    fn visit_u128<E>(self, value: u128) -> Result<Value, E> {
        let mut buffer = itoa::Buffer::new();
        Ok(Value::Number(Number::from_digits_unchecked(
            buffer.format(value).to_owned(),
        )))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(value.to_owned()))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let Some(first) = map.next_key::<String>()? else {
            return Ok(Value::Object(Vec::new()));
        };
        if first == NUMBER_TOKEN {
            let text: String = map.next_value()?;
            if number::is_valid_literal(text.as_bytes()) {
                return Ok(Value::Number(Number::from_digits_unchecked(text)));
            }
            // A real map that happens to start with the marker key.
            let mut pairs = vec![(first, Value::String(text))];
            while let Some(entry) = map.next_entry()? {
                pairs.push(entry);
            }
            return Ok(Value::Object(pairs));
        }
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0).saturating_add(1));
        let value = map.next_value()?;
        pairs.push((first, value));
        while let Some(entry) = map.next_entry()? {
            pairs.push(entry);
        }
        Ok(Value::Object(pairs))
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Number, D::Error> {
        deserializer.deserialize_any(NumberVisitor)
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Number;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON number")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Number, E> {
        Ok(Number::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Number, E> {
        Ok(Number::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Number, E> {
        Number::from_f64(value)
            .ok_or_else(|| E::invalid_value(de::Unexpected::Float(value), &self))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Number, A::Error> {
        match map.next_key::<String>()? {
            Some(key) if key == NUMBER_TOKEN => {
                let text: String = map.next_value()?;
                Number::from_digits(text).map_err(de::Error::custom)
            }
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{convert::IntoJson, error::AccessError};

    #[test_case("null", Value::Null; "null")]
    #[test_case("\"abc\"", "abc".into_json(); "string")]
    #[test_case("43", 43u8.into_json(); "integer")]
    #[test_case("-1.5", (-1.5f64).into_json(); "fraction")]
    #[test_case("true", Value::Bool(true); "bool true")]
    #[test_case("false", Value::Bool(false); "bool false")]
    #[test_case("{}", Value::Object(Vec::new()); "empty object")]
    #[test_case("[]", Value::Array(Vec::new()); "empty array")]
    #[test_case("[1, \"a\", null]", Value::array([1u8.into_json(), "a".into_json(), Value::Null]); "mixed array")]
    fn trial_sequence_decodes_every_shape(input: &str, expected: Value) {
        assert_eq!(from_str(input).expect("decodes"), expected);
    }

    #[test]
    fn preserves_digits_beyond_native_range() {
        let value = from_str("36893488147419103232").expect("decodes");
        assert_eq!(value.digits().expect("number"), "36893488147419103232");
        let exponent = from_str("1e1000001").expect("decodes");
        assert_eq!(exponent.digits().expect("number"), "1e1000001");
    }

    #[test]
    fn preserves_duplicate_keys_in_order() {
        let value = from_str(r#"{"x":1,"a":true,"x":2}"#).expect("decodes");
        assert_eq!(
            value.as_object().expect("object"),
            Value::object([
                ("x", 1u8.into_json()),
                ("a", true.into_json()),
                ("x", 2u8.into_json()),
            ])
            .as_object()
            .expect("object")
        );
    }

    #[test]
    fn strict_mode_rejects_duplicate_keys() {
        let options = DecodeOptions::new().duplicate_keys(DuplicateKeys::Reject);
        let error = from_str_with(r#"{"outer":{"x":1,"x":2}}"#, options).expect_err("duplicate");
        match error {
            DecodeError::DuplicateKey { key, path } => {
                assert_eq!(key, "x");
                assert_eq!(path.to_string(), "/outer");
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
        assert!(from_str_with(r#"{"x":1,"y":2}"#, options).is_ok());
    }

    #[test_case("{\"a\": tr"; "truncated keyword")]
    #[test_case("[1,"; "truncated array")]
    #[test_case("{\"a\" 1}"; "missing colon")]
    #[test_case("[1 2]"; "missing comma")]
    fn malformed_input_aborts_with_syntax_error(input: &str) {
        assert!(matches!(
            from_str(input),
            Err(DecodeError::Syntax(_))
        ));
    }

    #[test]
    fn depth_limit_is_enforced() {
        let mut input = String::new();
        for _ in 0..50 {
            input.push('[');
        }
        input.push('1');
        for _ in 0..50 {
            input.push(']');
        }
        let options = DecodeOptions::new().max_depth(10);
        let error = from_str_with(&input, options).expect_err("too deep");
        match error {
            DecodeError::DepthLimit { path } => {
                assert_eq!(path.segments().len(), 10);
            }
            other => panic!("expected DepthLimit, got {other:?}"),
        }
        assert!(from_str(&input).is_ok());
    }

    #[test]
    fn decode_errors_carry_paths() {
        let error = from_str_with(
            r#"{"a":[{"x":1,"x":1}]}"#,
            DecodeOptions::new().duplicate_keys(DuplicateKeys::Reject),
        )
        .expect_err("duplicate");
        match error {
            DecodeError::DuplicateKey { path, .. } => {
                assert_eq!(path.to_string(), "/a/0");
            }
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
    }

    #[test]
    fn from_slice_matches_from_str() {
        let text = r#"{"name":"Bob","age":43}"#;
        assert_eq!(
            from_slice(text.as_bytes()).expect("decodes"),
            from_str(text).expect("decodes")
        );
    }

    #[test]
    fn from_raw_runs_the_same_trials() {
        let raw: &RawValue = serde_json::from_str("[null]").expect("valid JSON");
        assert_eq!(
            from_raw(raw).expect("decodes"),
            Value::array([Value::Null])
        );
    }

    #[test]
    fn generic_path_agrees_with_trial_path() {
        let text = r#"{"name":"Bob","n":36893488147419103232,"tags":[1,2.5,null]}"#;
        let via_serde: Value = serde_json::from_str(text).expect("decodes");
        let via_trials = from_str(text).expect("decodes");
        assert_eq!(via_serde, via_trials);
    }

    #[test]
    fn number_deserializes_directly() {
        let number: Number = serde_json::from_str("36893488147419103232").expect("decodes");
        assert_eq!(number.digits(), "36893488147419103232");
        assert!(serde_json::from_str::<Number>("\"43\"").is_err());
        assert!(serde_json::from_str::<Number>("{\"a\":1}").is_err());
    }

    #[test]
    fn number_parse_still_guards_range() {
        let number: Number = serde_json::from_str("1.5").expect("decodes");
        assert!(matches!(
            number.parse::<i32>(),
            Err(AccessError::TypeMismatch { .. })
        ));
    }
}
