#![allow(clippy::missing_errors_doc)]

use core::fmt;
use std::str::FromStr;

use crate::error::{AccessError, Kind};

/// A JSON number stored as its verbatim literal text.
///
/// The digits are kept exactly as written and never normalized, so
/// magnitudes beyond `u64`/`i64` range and precision beyond `f64` survive
/// decode/encode unchanged. Native values come out through [`parse`],
/// which applies the target type's own parser and fails with
/// [`AccessError::TypeMismatch`] when the digits are not representable.
///
/// Comparison, hashing, and ordering are textual, not numeric:
/// `1.0` and `1` are different numbers here, as are `100` and `1e2`.
///
/// [`parse`]: Number::parse
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Number {
    digits: Box<str>,
}

impl Number {
    /// Creates a number from a JSON number literal.
    ///
    /// The text must match the RFC 8259 number grammar: optional leading
    /// `-`, an integer part without redundant leading zeros, an optional
    /// fraction, and an optional exponent. Anything else fails with
    /// [`AccessError::TypeMismatch`].
    pub fn from_digits(digits: impl Into<String>) -> Result<Number, AccessError> {
        let digits = digits.into();
        if is_valid_literal(digits.as_bytes()) {
            Ok(Number {
                digits: digits.into_boxed_str(),
            })
        } else {
            Err(AccessError::TypeMismatch {
                expected: "a JSON number literal",
                actual: "malformed text",
            })
        }
    }

    /// Wraps text already known to satisfy the number grammar.
    pub(crate) fn from_digits_unchecked(digits: String) -> Number {
        debug_assert!(is_valid_literal(digits.as_bytes()));
        Number {
            digits: digits.into_boxed_str(),
        }
    }

    /// The verbatim literal text.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Parses the digits into any type with a string parser.
    ///
    /// Integer targets fail on fractions, exponents, and overflow; float
    /// targets follow their standard parser, which saturates very large
    /// magnitudes to infinity.
    pub fn parse<T: FromStr>(&self) -> Result<T, AccessError> {
        self.digits.parse().map_err(|_| AccessError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            actual: Kind::Number.as_str(),
        })
    }

    /// Reads the digits as `i64`.
    pub fn as_i64(&self) -> Result<i64, AccessError> {
        self.parse()
    }

    /// Reads the digits as `u64`.
    pub fn as_u64(&self) -> Result<u64, AccessError> {
        self.parse()
    }

    /// Reads the digits as `f64`.
    pub fn as_f64(&self) -> Result<f64, AccessError> {
        self.parse()
    }

    /// Creates a number from a finite double. `None` for NaN and
    /// infinities, which have no JSON literal form.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Number> {
        value.is_finite().then(|| Number {
            digits: value.to_string().into_boxed_str(),
        })
    }

    /// Creates a number from a finite single-precision float. `None` for
    /// NaN and infinities.
    #[must_use]
    pub fn from_f32(value: f32) -> Option<Number> {
        value.is_finite().then(|| Number {
            digits: value.to_string().into_boxed_str(),
        })
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl FromStr for Number {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_digits(s)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Number {
                    let mut buffer = itoa::Buffer::new();
                    Number {
                        digits: buffer.format(value).into(),
                    }
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(feature = "bigint")]
impl Number {
    /// Parses the digits as an arbitrary-precision integer. Fractions and
    /// exponent forms fail with [`AccessError::TypeMismatch`].
    pub fn to_bigint(&self) -> Result<num_bigint::BigInt, AccessError> {
        self.digits.parse().map_err(|_| AccessError::TypeMismatch {
            expected: "an arbitrary-precision integer",
            actual: Kind::Number.as_str(),
        })
    }
}

#[cfg(feature = "bigint")]
impl From<num_bigint::BigInt> for Number {
    fn from(value: num_bigint::BigInt) -> Number {
        Number {
            digits: value.to_string().into_boxed_str(),
        }
    }
}

#[cfg(feature = "bigint")]
impl From<num_bigint::BigUint> for Number {
    fn from(value: num_bigint::BigUint) -> Number {
        Number {
            digits: value.to_string().into_boxed_str(),
        }
    }
}

/// Checks the RFC 8259 number grammar:
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][-+]?[0-9]+)?`
pub(crate) fn is_valid_literal(bytes: &[u8]) -> bool {
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    i == bytes.len()
}
