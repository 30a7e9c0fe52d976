use core::fmt;

use crate::{number::Number, value::Value};

/// Renders reconstruction source: quoted/escaped string literals, plain
/// digits when native formatting reproduces them exactly (otherwise the
/// explicit `digits("…")` form), `{}`/`[]` for the empty containers,
/// insertion-ordered object bodies, and `null`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(text) => write!(f, "{text:?}"),
            Value::Number(number) => write_number(f, number),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Object(pairs) => write_object(f, pairs),
            Value::Array(items) => write_array(f, items),
            Value::Null => f.write_str("null"),
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, number: &Number) -> fmt::Result {
    let digits = number.digits();
    if formats_back_exactly(digits) {
        f.write_str(digits)
    } else {
        write!(f, "digits({digits:?})")
    }
}

/// Whether formatting the native parse of `digits` reproduces the text
/// exactly. When it does not (beyond-range magnitudes, exponent forms,
/// trailing fractional zeros), the rendering keeps the digits inside an
/// explicit constructor call so the exact value survives a read-back.
fn formats_back_exactly(digits: &str) -> bool {
    let mut buffer = itoa::Buffer::new();
    if let Ok(parsed) = digits.parse::<i64>() {
        if buffer.format(parsed) == digits {
            return true;
        }
    }
    if let Ok(parsed) = digits.parse::<u64>() {
        if buffer.format(parsed) == digits {
            return true;
        }
    }
    if let Ok(parsed) = digits.parse::<f64>() {
        if parsed.is_finite() && parsed.to_string() == digits {
            return true;
        }
    }
    false
}

fn write_object(f: &mut fmt::Formatter<'_>, pairs: &[(String, Value)]) -> fmt::Result {
    f.write_str("{")?;
    for (i, (key, value)) in pairs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{key:?}: {value}")?;
    }
    f.write_str("}")
}

fn write_array(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use crate::{convert::IntoJson, value::Value};

    #[test_case("abc".into_json(), "\"abc\""; "plain string")]
    #[test_case("say \"hi\"".into_json(), "\"say \\\"hi\\\"\""; "escaped string")]
    #[test_case(123u32.into_json(), "123"; "integer")]
    #[test_case((-17i8).into_json(), "-17"; "negative integer")]
    #[test_case(u64::MAX.into_json(), "18446744073709551615"; "u64 max")]
    #[test_case(1.25f64.into_json(), "1.25"; "float")]
    #[test_case(true.into_json(), "true"; "bool true")]
    #[test_case(false.into_json(), "false"; "bool false")]
    #[test_case(Value::Null, "null"; "null")]
    #[test_case(Value::Object(Vec::new()), "{}"; "empty object")]
    #[test_case(Value::Array(Vec::new()), "[]"; "empty array")]
    fn renders_scalars(value: Value, expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test_case("36893488147419103232", "digits(\"36893488147419103232\")"; "beyond u64")]
    #[test_case("1e2", "digits(\"1e2\")"; "exponent form")]
    #[test_case("1.0", "digits(\"1.0\")"; "trailing fractional zero")]
    #[test_case("-0", "-0"; "negative zero formats back")]
    #[test_case("18446744073709551615", "18446744073709551615"; "u64 only")]
    fn renders_numbers_with_fidelity_marker(digits: &str, expected: &str) {
        let value = Value::from_digits(digits).expect("valid literal");
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn renders_objects_in_insertion_order() {
        let value = Value::object([("b", 1u8.into_json()), ("a", 2u8.into_json())]);
        assert_eq!(value.to_string(), "{\"b\": 1, \"a\": 2}");
    }

    #[test]
    fn renders_arrays_comma_joined() {
        let value = Value::array([1u8.into_json(), true.into_json(), Value::Null]);
        assert_eq!(value.to_string(), "[1, true, null]");
    }

    #[test]
    fn renders_nested_structures() {
        let value = Value::object([
            ("items", Value::array([Value::Null])),
            ("empty", Value::Object(Vec::new())),
        ]);
        assert_eq!(value.to_string(), "{\"items\": [null], \"empty\": {}}");
    }
}
