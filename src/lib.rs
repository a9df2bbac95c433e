//! # serde_shape
//!
//! A JSON-like text codec for Serde types, driven by type descriptors on the
//! decode side and guarded against cyclic object graphs on the encode side.
//!
//! ## How it works
//!
//! Encoding walks any `Serialize` value and writes composites as
//! `{"name": value, ...}`, sequences as `[a, b, c]` and absent values as
//! `null`. A depth guard bounds composite nesting, so a cyclic graph fails
//! with [`Error::DepthExceeded`] instead of overflowing the stack.
//!
//! Decoding does not guess. The caller supplies a [`TypeDescriptor`] (usually
//! through the [`Describe`] trait) and the text is read against that shape:
//! attribute names are checked against the composite, sequence elements are
//! decoded one rank down, and scalar text is coerced into the declared kind.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: encode any `#[derive(Serialize)]` type
//! - **Descriptor Driven**: decode into `Describe + Deserialize` types, or into
//!   a dynamic [`Value`] from a bare descriptor
//! - **Cycle Safe**: encoding fails cleanly past 10 nested composites by default
//! - **Typed Errors**: every failure names the offending text or attribute
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_shape::{describe, from_str, to_string};
//!
//! describe! {
//!     #[derive(Serialize, Deserialize, PartialEq, Debug)]
//!     struct User {
//!         id: u32,
//!         name: String,
//!         tags: Vec<String>,
//!     }
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     tags: vec!["admin".to_string()],
//! };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, r#"{"id": 123, "name": "Alice", "tags": ["admin"]}"#);
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Dynamic Values with value! Macro
//!
//! ```rust
//! use serde_shape::{value, Value};
//!
//! let data = value!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let Value::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ### Decoding Without a Target Type
//!
//! ```rust
//! use serde_shape::{decode, Describe};
//!
//! let value = decode(r#"["a", null, "c"]"#, &Vec::<String>::descriptor()).unwrap();
//! assert_eq!(value.to_string(), r#"["a", null, "c"]"#);
//! ```
//!
//! ## Format
//!
//! The grammar, scalar forms and known limitations are documented in the
//! [`format`] module.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - encoding and decoding a derived struct
//! - **`descriptors.rs`** - describing recursive types and jagged arrays
//! - **`dynamic_values.rs`** - working with [`Value`] directly
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod descriptor;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod tokenizer;
pub mod value;

pub use de::{Decoder, ValueDeserializer};
pub use descriptor::{Attribute, CompositeDescriptor, Describe, ScalarKind, TypeDescriptor};
pub use error::{Error, Result};
pub use map::ValueMap;
pub use options::{CodecOptions, MAX_COMPOSITE_DEPTH, MAX_NESTING};
pub use ser::{Serializer, ValueSerializer};
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a compact string.
///
/// # Examples
///
/// ```rust
/// use serde_shape::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), r#"{"x": 1, "y": 2}"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::DepthExceeded`] for composites nested past the default
/// bound, and [`Error::UnsupportedType`] for values the format cannot express.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, CodecOptions::default())
}

/// Serialize any `T: Serialize` to a pretty-printed string.
///
/// # Examples
///
/// ```rust
/// use serde_shape::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string_pretty(&point).unwrap(), "{\n  \"x\": 1,\n  \"y\": 2\n}");
/// ```
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, CodecOptions::pretty())
}

/// Serialize any `T: Serialize` to a string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_shape::{to_string_with_options, CodecOptions, Error};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Wrapper { inner: Inner }
///
/// #[derive(Serialize)]
/// struct Inner { x: i32 }
///
/// let value = Wrapper { inner: Inner { x: 1 } };
/// let options = CodecOptions::new().with_max_depth(1);
/// assert_eq!(
///     to_string_with_options(&value, options),
///     Err(Error::DepthExceeded { max: 1 })
/// );
/// ```
///
/// # Errors
///
/// Same as [`to_string`], with the bound taken from `options`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: CodecOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_shape::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let value: Value = to_value(&point).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    to_value_with_options(value, &CodecOptions::default())
}

/// Convert any `T: Serialize` to a [`Value`] with custom options.
///
/// # Errors
///
/// Same as [`to_string_with_options`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value_with_options<T>(value: &T, options: &CodecOptions) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new(options))
}

/// Serialize any `T: Serialize` to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_shape::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &vec![1, 2]).unwrap();
/// assert_eq!(buffer, b"[1, 2]");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, CodecOptions::default())
}

/// Serialize any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: CodecOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Decode text into a dynamic [`Value`] shaped by `descriptor`.
///
/// # Examples
///
/// ```rust
/// use serde_shape::{decode, ScalarKind, TypeDescriptor, Value};
///
/// let value = decode("'x'", &TypeDescriptor::Scalar(ScalarKind::I32));
/// assert!(value.is_err());
///
/// let value = decode(" 42 ", &TypeDescriptor::Scalar(ScalarKind::I32)).unwrap();
/// assert_eq!(value, Value::from(42));
/// ```
///
/// # Errors
///
/// See [`Decoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(text: &str, descriptor: &TypeDescriptor) -> Result<Value> {
    decode_with_options(text, descriptor, &CodecOptions::default())
}

/// Decode text into a dynamic [`Value`] with custom options.
///
/// # Errors
///
/// See [`Decoder::decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(
    text: &str,
    descriptor: &TypeDescriptor,
    options: &CodecOptions,
) -> Result<Value> {
    Decoder::new(options).decode(text, descriptor)
}

/// Deserialize any `T: Deserialize` out of a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_shape::{from_value, value};
///
/// let pair: (String, i64) = from_value(value!(["x", 2])).unwrap();
/// assert_eq!(pair, ("x".to_string(), 2));
/// ```
///
/// # Errors
///
/// Returns an error when the value does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from text.
///
/// The text is decoded against `T::descriptor()` and the resulting value is
/// handed to `T`'s `Deserialize` impl.
///
/// # Examples
///
/// ```rust
/// use serde_shape::{describe, from_str};
/// use serde::Deserialize;
///
/// describe! {
///     #[derive(Deserialize, PartialEq, Debug)]
///     struct Point { x: i32, y: i32 }
/// }
///
/// let point: Point = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// The literal `null` decodes for every descriptor, but only an `Option<T>`
/// target accepts it. Read nullable text into `Option<T>`; a bare `T` fails
/// with a type error.
///
/// ```rust
/// use serde_shape::from_str;
///
/// assert_eq!(from_str::<Option<Vec<i32>>>("null").unwrap(), None);
/// assert!(from_str::<Vec<i32>>("null").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the text does not match the described shape or the
/// decoded value cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: Describe + DeserializeOwned,
{
    from_str_with_options(s, &CodecOptions::default())
}

/// Deserialize an instance of type `T` from text with custom options.
///
/// # Errors
///
/// Same as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &CodecOptions) -> Result<T>
where
    T: Describe + DeserializeOwned,
{
    let value = decode_with_options(s, &T::descriptor(), options)?;
    from_value(value)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_shape::from_reader;
/// use std::io::Cursor;
///
/// let numbers: Vec<u16> = from_reader(Cursor::new(b"[1, 2, 3]")).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, or as for [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: Describe + DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or as for [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: Describe + DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    crate::impl_describe!(Point { x: i32, y: i32 });

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        home: Option<Point>,
    }

    crate::impl_describe!(User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
        home: Option<Point>,
    });

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
            home: Some(Point { x: -4, y: 9 }),
        }
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let user = alice();
        let text = to_string(&user).unwrap();
        assert_eq!(
            text,
            r#"{"id": 123, "name": "Alice", "active": true, "tags": ["admin", "user"], "home": {"x": -4, "y": 9}}"#
        );
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_pretty_printing() {
        let user = alice();
        let text = to_string_pretty(&user).unwrap();
        assert!(text.contains("\n  \"home\": {\n    \"x\": -4,"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_absent_option_round_trips() {
        let user = User {
            home: None,
            ..alice()
        };
        let text = to_string(&user).unwrap();
        assert!(text.ends_with(r#""home": null}"#));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_null_needs_option_target() {
        assert_eq!(from_str::<Option<Vec<i32>>>("null").unwrap(), None);
        assert_eq!(from_str::<Option<Point>>(" null ").unwrap(), None);
        assert!(from_str::<Vec<i32>>("null").is_err());
        assert!(from_str::<Point>("null").is_err());
        assert!(from_str::<u8>("null").is_err());
    }

    #[test]
    fn test_to_value() {
        let point = Point { x: 1, y: 2 };
        let value = to_value(&point).unwrap();

        match value {
            Value::Object(obj) => {
                assert_eq!(obj.get("x"), Some(&Value::Number(Number::Integer(1))));
                assert_eq!(obj.get("y"), Some(&Value::Number(Number::Integer(2))));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_decode_matches_to_value() {
        let user = alice();
        let text = to_string(&user).unwrap();
        let decoded = decode(&text, &User::descriptor()).unwrap();
        assert_eq!(decoded.get("tags"), to_value(&user).unwrap().get("tags"));
        assert_eq!(decoded.get("name"), Some(&Value::from("Alice")));
    }

    #[test]
    fn test_arrays() {
        let numbers = vec![1, 2, 3, 4, 5];
        let text = to_string(&numbers).unwrap();
        assert_eq!(text, "[1, 2, 3, 4, 5]");
        let numbers_back: Vec<i32> = from_str(&text).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn test_custom_options() {
        let user = alice();
        let options = CodecOptions::pretty().with_indent(4);

        let text = to_string_with_options(&user, options).unwrap();
        assert!(text.starts_with("{\n    \"id\": 123,"));
        let user_back: User = from_str(&text).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn test_writer_and_slice() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &Point { x: 5, y: 6 }).unwrap();
        let point: Point = from_slice(&buffer).unwrap();
        assert_eq!(point, Point { x: 5, y: 6 });

        assert!(matches!(
            from_slice::<Point>(&[0xff, 0xfe]),
            Err(Error::Custom(_))
        ));
    }

    #[test]
    fn test_missing_attribute_is_reported_by_target() {
        let result: Result<Point> = from_str(r#"{"x": 1}"#);
        assert!(matches!(result, Err(Error::Custom(msg)) if msg.contains("y")));
    }
}
