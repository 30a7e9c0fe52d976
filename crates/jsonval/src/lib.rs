//! # jsonval
//!
//! A lossless JSON value model: numbers keep their source digits,
//! objects keep their key order and repeated keys.
//!
//! ```rust
//! let customer = jsonval::from_str(r#"{"name":"Bob","age":43}"#)?;
//! assert_eq!(customer.get("name")?.as_str()?, "Bob");
//! assert_eq!(customer.get("age")?.to_number::<u32>()?, 43);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
mod convert;
mod de;
mod display;
mod error;
mod macros;
mod number;
mod ser;
mod value;

pub use convert::{IntoJson, TryIntoJson};
pub use de::{
    from_raw, from_raw_with, from_slice, from_slice_with, from_str, from_str_with, DecodeOptions,
    DuplicateKeys,
};
pub use error::{AccessError, DecodeError, Kind, Path, PathSegment};
pub use number::Number;
pub use ser::{to_string, to_string_pretty, to_vec};
pub use serde_json::value::RawValue;
pub use value::Value;
