//! Type descriptors: the runtime shape of a target type.
//!
//! A [`TypeDescriptor`] tells the decoder what a piece of text is supposed to
//! become: a scalar of some [`ScalarKind`], a sequence of some element type
//! and rank, or a composite with an ordered list of named, typed attributes.
//!
//! Types opt in through the [`Describe`] trait. Scalars, `String`, dates and
//! the standard containers implement it here; structs register through the
//! [`describe!`](crate::describe) and [`impl_describe!`](crate::impl_describe)
//! macros, which capture attributes in declaration order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_shape::{Describe, ScalarKind, TypeDescriptor};
//!
//! assert_eq!(i32::descriptor(), TypeDescriptor::Scalar(ScalarKind::I32));
//!
//! // Arrays of arrays collapse into one sequence with a rank
//! match Vec::<Vec<bool>>::descriptor() {
//!     TypeDescriptor::Sequence { element, rank } => {
//!         assert_eq!(*element, TypeDescriptor::Scalar(ScalarKind::Bool));
//!         assert_eq!(rank, 2);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::{Error, Number, Result, Value};
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt;

/// The closed set of scalar kinds the codec can coerce text into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
    /// An RFC 3339 timestamp, written as quoted text.
    Date,
}

impl ScalarKind {
    /// Returns `true` for kinds whose text form is wrapped in double quotes.
    #[inline]
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, ScalarKind::Char | ScalarKind::String | ScalarKind::Date)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
            ScalarKind::Date => "date",
        }
    }

    /// Coerces already quote-stripped text into a value of this kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_shape::{Number, ScalarKind, Value};
    ///
    /// assert_eq!(ScalarKind::I16.coerce("-12").unwrap(), Value::Number(Number::Integer(-12)));
    /// assert_eq!(ScalarKind::Bool.coerce("true").unwrap(), Value::Bool(true));
    /// assert!(ScalarKind::U8.coerce("256").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::Coercion`] when the text is not a literal of this kind.
    pub fn coerce(self, text: &str) -> Result<Value> {
        let fail = || {
            tracing::debug!(kind = %self, text, "scalar coercion failed");
            Error::coercion(text, self)
        };

        let value = match self {
            ScalarKind::Bool => match text {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => return Err(fail()),
            },
            ScalarKind::I8 => signed(text.parse::<i8>().map_err(|_| fail())?),
            ScalarKind::I16 => signed(text.parse::<i16>().map_err(|_| fail())?),
            ScalarKind::I32 => signed(text.parse::<i32>().map_err(|_| fail())?),
            ScalarKind::I64 => signed(text.parse::<i64>().map_err(|_| fail())?),
            ScalarKind::U8 => unsigned(text.parse::<u8>().map_err(|_| fail())?),
            ScalarKind::U16 => unsigned(text.parse::<u16>().map_err(|_| fail())?),
            ScalarKind::U32 => unsigned(text.parse::<u32>().map_err(|_| fail())?),
            ScalarKind::U64 => unsigned(text.parse::<u64>().map_err(|_| fail())?),
            ScalarKind::F32 | ScalarKind::F64 if !is_decimal(text) => return Err(fail()),
            ScalarKind::F32 => {
                let f = text.parse::<f32>().map_err(|_| fail())?;
                Value::Number(Number::Float(f64::from(f)))
            }
            ScalarKind::F64 => Value::Number(Number::Float(text.parse().map_err(|_| fail())?)),
            ScalarKind::Char => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Value::Char(c),
                    _ => return Err(fail()),
                }
            }
            ScalarKind::String => Value::String(text.to_string()),
            ScalarKind::Date => {
                let parsed = DateTime::parse_from_rfc3339(text).map_err(|_| fail())?;
                Value::Date(parsed.with_timezone(&Utc))
            }
        };
        Ok(value)
    }
}

/// Plain decimal text: an optional sign, digits, at most one point. No
/// exponent, `inf` or `NaN`.
fn is_decimal(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut points = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' => points += 1,
            _ => return false,
        }
    }
    seen_digit && points <= 1
}

fn signed<T: Into<i64>>(n: T) -> Value {
    Value::Number(Number::Integer(n.into()))
}

fn unsigned<T: Into<u64>>(n: T) -> Value {
    Value::Number(Number::Unsigned(n.into()))
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The shape of a target type.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDescriptor {
    Scalar(ScalarKind),
    /// A sequence of `rank` nested levels whose innermost elements are
    /// `element`. `element` is never itself a sequence.
    Sequence {
        element: Box<TypeDescriptor>,
        rank: usize,
    },
    Composite(CompositeDescriptor),
}

impl TypeDescriptor {
    /// Describes a sequence whose elements have the given descriptor.
    ///
    /// A sequence of sequences is folded into a single descriptor of higher rank.
    #[must_use]
    pub fn sequence_of(element: TypeDescriptor) -> Self {
        match element {
            TypeDescriptor::Sequence { element, rank } => TypeDescriptor::Sequence {
                element,
                rank: rank + 1,
            },
            other => TypeDescriptor::Sequence {
                element: Box::new(other),
                rank: 1,
            },
        }
    }

    /// Returns the descriptor of a single element of this sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedType`] if this is not a sequence or its rank is zero.
    pub fn element_descriptor(&self) -> Result<Cow<'_, TypeDescriptor>> {
        match self {
            TypeDescriptor::Sequence { element, rank: 1 } => Ok(Cow::Borrowed(element.as_ref())),
            TypeDescriptor::Sequence { element, rank } if *rank > 1 => {
                Ok(Cow::Owned(TypeDescriptor::Sequence {
                    element: element.clone(),
                    rank: rank - 1,
                }))
            }
            TypeDescriptor::Sequence { .. } => {
                Err(Error::unsupported_type("sequence descriptor with rank 0"))
            }
            other => Err(Error::unsupported_type(&format!(
                "{} has no elements",
                other.name()
            ))),
        }
    }

    /// A short human-readable name for error messages.
    #[must_use]
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            TypeDescriptor::Scalar(kind) => Cow::Borrowed(kind.as_str()),
            TypeDescriptor::Sequence { element, rank } => {
                let mut name = element.name().into_owned();
                for _ in 0..*rank {
                    name.push_str("[]");
                }
                Cow::Owned(name)
            }
            TypeDescriptor::Composite(composite) => Cow::Borrowed(composite.name),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, TypeDescriptor::Scalar(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, TypeDescriptor::Sequence { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, TypeDescriptor::Composite(_))
    }
}

/// A record type: a name and its attributes in declaration order.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeDescriptor {
    pub name: &'static str,
    pub attributes: Vec<Attribute>,
}

impl CompositeDescriptor {
    #[must_use]
    pub fn new(name: &'static str, attributes: Vec<Attribute>) -> Self {
        CompositeDescriptor { name, attributes }
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// A named attribute of a composite.
///
/// The attribute's own descriptor is built on demand so that a type may refer
/// to itself, directly or through other types.
#[derive(Clone, Copy)]
pub struct Attribute {
    pub name: &'static str,
    describe: fn() -> TypeDescriptor,
}

impl Attribute {
    #[must_use]
    pub fn new(name: &'static str, describe: fn() -> TypeDescriptor) -> Self {
        Attribute { name, describe }
    }

    /// Builds this attribute's descriptor.
    #[must_use]
    pub fn descriptor(&self) -> TypeDescriptor {
        (self.describe)()
    }
}

// Comparing by name keeps equality finite for recursive types.
impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute").field("name", &self.name).finish()
    }
}

/// Types that can report their [`TypeDescriptor`].
///
/// # Examples
///
/// ```rust
/// use serde_shape::{Attribute, CompositeDescriptor, Describe, TypeDescriptor};
///
/// struct Point { x: i32, y: i32 }
///
/// impl Describe for Point {
///     fn descriptor() -> TypeDescriptor {
///         TypeDescriptor::Composite(CompositeDescriptor::new(
///             "Point",
///             vec![
///                 Attribute::new("x", <i32 as Describe>::descriptor),
///                 Attribute::new("y", <i32 as Describe>::descriptor),
///             ],
///         ))
///     }
/// }
///
/// assert!(Point::descriptor().is_composite());
/// ```
pub trait Describe {
    fn descriptor() -> TypeDescriptor;
}

macro_rules! describe_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::Scalar(ScalarKind::$kind)
                }
            }
        )*
    };
}

describe_scalar! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
    DateTime<Utc> => Date,
}

// Null is accepted for every kind, so optionality does not change the shape.
impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Describe> Describe for Box<T> {
    fn descriptor() -> TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::sequence_of(T::descriptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node;

    impl Describe for Node {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::Composite(CompositeDescriptor::new(
                "Node",
                vec![
                    Attribute::new("id", <u32 as Describe>::descriptor),
                    Attribute::new("next", <Option<Box<Node>> as Describe>::descriptor),
                ],
            ))
        }
    }

    #[test]
    fn test_rank_folds_nested_sequences() {
        match Vec::<Option<Vec<Vec<String>>>>::descriptor() {
            TypeDescriptor::Sequence { element, rank } => {
                assert_eq!(*element, TypeDescriptor::Scalar(ScalarKind::String));
                assert_eq!(rank, 3);
            }
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_element_descriptor_steps_down_one_rank() {
        let grid = Vec::<Vec<bool>>::descriptor();
        let row = grid.element_descriptor().unwrap();
        assert_eq!(*row, Vec::<bool>::descriptor());
        let cell = row.element_descriptor().unwrap();
        assert_eq!(*cell, TypeDescriptor::Scalar(ScalarKind::Bool));
        assert!(cell.element_descriptor().is_err());
    }

    #[test]
    fn test_zero_rank_is_unsupported() {
        let broken = TypeDescriptor::Sequence {
            element: Box::new(TypeDescriptor::Scalar(ScalarKind::I8)),
            rank: 0,
        };
        assert!(matches!(
            broken.element_descriptor(),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_self_referential_descriptor() {
        let descriptor = Node::descriptor();
        let TypeDescriptor::Composite(node) = &descriptor else {
            panic!("Expected composite");
        };
        let next = node.attribute("next").unwrap().descriptor();
        assert_eq!(next, descriptor);
        assert!(node.attribute("missing").is_none());
    }

    #[test]
    fn test_names() {
        assert_eq!(Vec::<Vec<f64>>::descriptor().name(), "f64[][]");
        assert_eq!(Node::descriptor().name(), "Node");
    }

    #[test]
    fn test_coerce_integer_widths() {
        assert_eq!(
            ScalarKind::I8.coerce("-128").unwrap(),
            Value::Number(Number::Integer(-128))
        );
        assert!(ScalarKind::I8.coerce("128").is_err());
        assert_eq!(
            ScalarKind::U64.coerce("18446744073709551615").unwrap(),
            Value::Number(Number::Unsigned(u64::MAX))
        );
        assert!(ScalarKind::U32.coerce("-1").is_err());
        assert!(ScalarKind::I32.coerce("3.5").is_err());
        assert_eq!(
            ScalarKind::I64.coerce("+7").unwrap(),
            Value::Number(Number::Integer(7))
        );
    }

    #[test]
    fn test_coerce_floats() {
        assert_eq!(
            ScalarKind::F64.coerce("10.5").unwrap(),
            Value::Number(Number::Float(10.5))
        );
        assert_eq!(
            ScalarKind::F32.coerce("0.1").unwrap(),
            Value::Number(Number::Float(f64::from(0.1f32)))
        );
        assert!(ScalarKind::F64.coerce("ten").is_err());
        assert_eq!(
            ScalarKind::F64.coerce("-3").unwrap(),
            Value::Number(Number::Float(-3.0))
        );
    }

    #[test]
    fn test_coerce_floats_rejects_extended_forms() {
        for text in ["1e5", "2.5E-3", "inf", "-inf", "infinity", "NaN", ".", "-", "1.2.3"] {
            assert_eq!(
                ScalarKind::F64.coerce(text),
                Err(Error::coercion(text, ScalarKind::F64)),
                "{}",
                text
            );
            assert!(ScalarKind::F32.coerce(text).is_err(), "{}", text);
        }
    }

    #[test]
    fn test_coerce_bool_is_strict() {
        assert_eq!(ScalarKind::Bool.coerce("false").unwrap(), Value::Bool(false));
        let err = ScalarKind::Bool.coerce("yes").unwrap_err();
        assert_eq!(err, Error::coercion("yes", ScalarKind::Bool));
    }

    #[test]
    fn test_coerce_char_needs_exactly_one() {
        assert_eq!(ScalarKind::Char.coerce("M").unwrap(), Value::Char('M'));
        assert!(ScalarKind::Char.coerce("").is_err());
        assert!(ScalarKind::Char.coerce("MF").is_err());
    }

    #[test]
    fn test_coerce_date() {
        let value = ScalarKind::Date.coerce("2024-01-15T10:30:00+02:00").unwrap();
        let expected = DateTime::parse_from_rfc3339("2024-01-15T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(value, Value::Date(expected));
        assert!(ScalarKind::Date.coerce("yesterday").is_err());
    }
}
