//! Decoding.
//!
//! Decoding is driven by a [`TypeDescriptor`]: the [`Decoder`] reads text
//! against the shape it is told to expect, producing a [`Value`]. The
//! [`ValueDeserializer`] then hands that value to any `Deserialize` type.
//!
//! ## Overview
//!
//! - **Scalars**: the token is trimmed, unquoted for textual kinds, and coerced
//!   through [`ScalarKind::coerce`](crate::ScalarKind::coerce)
//! - **Composites**: the body between `{` and `}` is split into `"name": value`
//!   pairs; each name must be an attribute of the target
//! - **Sequences**: the body between `[` and `]` is split into elements, each
//!   decoded against the element descriptor (one rank down)
//! - **Null**: the literal `null` decodes to [`Value::Null`] for every target
//!
//! ## Usage
//!
//! ```rust
//! use serde_shape::{decode, Describe, Value};
//!
//! let value = decode("[[true, false], [false, true]]", &Vec::<Vec<bool>>::descriptor()).unwrap();
//! assert_eq!(value.as_array().map(Vec::len), Some(2));
//! assert_eq!(value.as_array().unwrap()[1].as_array().unwrap()[1], Value::Bool(true));
//! ```

use crate::descriptor::CompositeDescriptor;
use crate::tokenizer::{clean, split, strip_quotes, unwrap_delimited};
use crate::value::format_date;
use crate::{CodecOptions, Error, Number, Result, TypeDescriptor, Value, ValueMap};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Descriptor-driven text decoder.
///
/// # Examples
///
/// ```rust
/// use serde_shape::{CodecOptions, Decoder, Describe, Error};
///
/// let decoder = Decoder::new(&CodecOptions::new().with_max_nesting(2));
/// assert!(decoder.decode("[[1]]", &Vec::<Vec<i32>>::descriptor()).is_ok());
/// assert_eq!(
///     decoder.decode("[[[1]]]", &Vec::<Vec<Vec<i32>>>::descriptor()),
///     Err(Error::DepthExceeded { max: 2 })
/// );
/// ```
#[derive(Clone, Debug)]
pub struct Decoder {
    max_nesting: usize,
}

impl Decoder {
    pub fn new(options: &CodecOptions) -> Self {
        Decoder {
            max_nesting: options.max_nesting,
        }
    }

    /// Decodes `text` as a value of the type `descriptor` describes.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] when brackets or braces do not match the target
    /// - [`Error::Coercion`] when scalar text does not parse as the target kind
    /// - [`Error::UnknownAttribute`] when a composite names an undeclared attribute
    /// - [`Error::UnsupportedType`] for a sequence descriptor of rank zero
    /// - [`Error::DepthExceeded`] when nesting goes past the configured bound
    pub fn decode(&self, text: &str, descriptor: &TypeDescriptor) -> Result<Value> {
        self.decode_at(text, descriptor, 0)
    }

    fn decode_at(&self, text: &str, descriptor: &TypeDescriptor, level: usize) -> Result<Value> {
        let Some(text) = clean(text, descriptor) else {
            return Ok(Value::Null);
        };

        match descriptor {
            TypeDescriptor::Scalar(kind) => kind.coerce(text),
            TypeDescriptor::Composite(composite) => {
                self.decode_composite(text, composite, self.enter(level)?)
            }
            TypeDescriptor::Sequence { .. } => {
                self.decode_sequence(text, descriptor, self.enter(level)?)
            }
        }
    }

    fn enter(&self, level: usize) -> Result<usize> {
        if level >= self.max_nesting {
            tracing::debug!(max = self.max_nesting, "decode nesting limit reached");
            return Err(Error::depth_exceeded(self.max_nesting));
        }
        Ok(level + 1)
    }

    fn decode_composite(
        &self,
        text: &str,
        composite: &CompositeDescriptor,
        level: usize,
    ) -> Result<Value> {
        let body = unwrap_delimited(text, '{', '}').ok_or_else(|| {
            Error::malformed(&format!("`{{` ... `}}` for {}", composite.name), text)
        })?;
        tracing::trace!(type_name = composite.name, level, "decoding composite");

        let mut map = ValueMap::with_capacity(composite.attributes.len());
        if body.trim().is_empty() {
            return Ok(Value::Object(map));
        }

        for pair in split(body, ',', 0)? {
            let parts = split(pair, ':', 2)?;
            let [name, value] = parts.as_slice() else {
                return Err(Error::malformed("`\"name\": value`", pair));
            };

            let name = strip_quotes(name.trim());
            let attribute = composite.attribute(name).ok_or_else(|| {
                tracing::debug!(type_name = composite.name, name, "unknown attribute");
                Error::unknown_attribute(name, composite.name)
            })?;

            let value = self.decode_at(present(value, pair)?, &attribute.descriptor(), level)?;
            map.insert(attribute.name.to_string(), value);
        }

        Ok(Value::Object(map))
    }

    fn decode_sequence(
        &self,
        text: &str,
        descriptor: &TypeDescriptor,
        level: usize,
    ) -> Result<Value> {
        let body = unwrap_delimited(text, '[', ']').ok_or_else(|| {
            Error::malformed(&format!("`[` ... `]` for {}", descriptor.name()), text)
        })?;
        let element = descriptor.element_descriptor()?;
        tracing::trace!(element = %element.name(), level, "decoding sequence");

        if body.trim().is_empty() {
            return Ok(Value::Array(Vec::new()));
        }

        split(body, ',', 0)?
            .into_iter()
            .map(|item| self.decode_at(present(item, body)?, &element, level))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }
}

/// Rejects a token with nothing in it, such as the gap left by a stray comma.
fn present<'a>(token: &'a str, context: &str) -> Result<&'a str> {
    if token.trim().is_empty() {
        return Err(Error::malformed("a value", context));
    }
    Ok(token)
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(&CodecOptions::default())
    }
}

/// Deserializes a [`Value`] into any `Deserialize` type.
pub struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Unsigned(u)) => visitor.visit_u64(u),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::Char(c) => visitor.visit_char(c),
            Value::String(s) => visitor.visit_string(s),
            Value::Date(dt) => visitor.visit_string(format_date(&dt)),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer { variant }),
            other => Err(Error::unsupported_type(&format!(
                "enum {} must be a unit variant name, found {:?}",
                name, other
            ))),
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: ValueMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = UnitVariant;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.variant.into_deserializer())
            .map(|variant| (variant, UnitVariant))
    }
}

struct UnitVariant;

impl<'de> de::VariantAccess<'de> for UnitVariant {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        Ok(())
    }

    fn newtype_variant_seed<T>(self, _seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        Err(Error::unsupported_type("newtype enum variants"))
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("tuple enum variants"))
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::unsupported_type("struct enum variants"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Attribute;
    use crate::{Describe, ScalarKind};
    use serde::Deserialize;

    fn job() -> TypeDescriptor {
        TypeDescriptor::Composite(CompositeDescriptor::new(
            "Job",
            vec![
                Attribute::new("title", <String as Describe>::descriptor),
                Attribute::new("salary", <f64 as Describe>::descriptor),
                Attribute::new("directs", <Option<Vec<String>> as Describe>::descriptor),
                Attribute::new("manager", job),
            ],
        ))
    }

    fn decode(text: &str, descriptor: &TypeDescriptor) -> Result<Value> {
        Decoder::default().decode(text, descriptor)
    }

    #[test]
    fn test_decode_composite() {
        let value = decode(
            r#"{"title": "Engineer, Senior", "salary": 10.5, "directs": ["a", "b:c"], "manager": null}"#,
            &job(),
        )
        .unwrap();

        assert_eq!(value.get("title"), Some(&Value::from("Engineer, Senior")));
        assert_eq!(value.get("salary"), Some(&Value::from(10.5)));
        assert_eq!(
            value.get("directs"),
            Some(&Value::Array(vec![Value::from("a"), Value::from("b:c")]))
        );
        assert_eq!(value.get("manager"), Some(&Value::Null));
    }

    #[test]
    fn test_decode_nested_composite() {
        let value = decode(
            r#"{"title": "Dev", "manager": {"title": "Lead", "salary": 20}}"#,
            &job(),
        )
        .unwrap();
        let manager = value.get("manager").unwrap();
        assert_eq!(manager.get("title"), Some(&Value::from("Lead")));
        assert_eq!(manager.get("salary"), Some(&Value::from(20.0)));
        assert!(value.get("salary").is_none());
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        let value = decode("{\n  \"title\" :  \"Dev\" ,\n  \"salary\":1.5\n}\n", &job()).unwrap();
        assert_eq!(value.get("title"), Some(&Value::from("Dev")));
        assert_eq!(value.get("salary"), Some(&Value::from(1.5)));
    }

    #[test]
    fn test_decode_rank_two_booleans() {
        let value = decode(
            "[[true,false],[false,true]]",
            &Vec::<Vec<bool>>::descriptor(),
        )
        .unwrap();
        assert_eq!(
            value,
            Value::Array(vec![
                Value::Array(vec![Value::Bool(true), Value::Bool(false)]),
                Value::Array(vec![Value::Bool(false), Value::Bool(true)]),
            ])
        );
    }

    #[test]
    fn test_decode_null_for_every_kind() {
        assert_eq!(decode("null", &job()).unwrap(), Value::Null);
        assert_eq!(decode(" null ", &Vec::<i32>::descriptor()).unwrap(), Value::Null);
        assert_eq!(decode("null", &i32::descriptor()).unwrap(), Value::Null);
        assert_eq!(
            decode("\"null\"", &String::descriptor()).unwrap(),
            Value::from("null")
        );
    }

    #[test]
    fn test_decode_empty_bodies() {
        assert_eq!(decode("{}", &job()).unwrap(), Value::Object(ValueMap::new()));
        assert_eq!(decode("[ ]", &Vec::<u8>::descriptor()).unwrap(), Value::Array(vec![]));
        assert_eq!(
            decode("[\"\"]", &Vec::<String>::descriptor()).unwrap(),
            Value::Array(vec![Value::from("")])
        );
    }

    #[test]
    fn test_unknown_attribute() {
        assert_eq!(
            decode(r#"{"ghost": 1}"#, &job()),
            Err(Error::unknown_attribute("ghost", "Job"))
        );
    }

    #[test]
    fn test_malformed_bracketing() {
        assert!(matches!(
            decode(r#"["title"]"#, &job()),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            decode("{1, 2}", &Vec::<i32>::descriptor()),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            decode(r#"{"title"}"#, &job()),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            decode(r#"{"title": "a",}"#, &job()),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            decode("[[1, 2], [3]", &Vec::<Vec<i32>>::descriptor()),
            Err(Error::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_coercion_names_text_and_kind() {
        assert_eq!(
            decode(r#"{"salary": "lots"}"#, &job()),
            Err(Error::coercion("\"lots\"", ScalarKind::F64))
        );
        assert_eq!(
            decode("[1, 300]", &Vec::<u8>::descriptor()),
            Err(Error::coercion("300", ScalarKind::U8))
        );
    }

    #[test]
    fn test_zero_rank_sequence_is_unsupported() {
        let broken = TypeDescriptor::Sequence {
            element: Box::new(TypeDescriptor::Scalar(ScalarKind::I8)),
            rank: 0,
        };
        assert!(matches!(
            decode("[1]", &broken),
            Err(Error::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_nesting_limit_counts_all_containers() {
        let decoder = Decoder::new(&CodecOptions::new().with_max_nesting(3));
        let descriptor = job();
        assert!(decoder
            .decode(r#"{"manager": {"directs": ["x"]}}"#, &descriptor)
            .is_ok());
        assert_eq!(
            decoder.decode(
                r#"{"manager": {"manager": {"directs": ["x"]}}}"#,
                &descriptor
            ),
            Err(Error::DepthExceeded { max: 3 })
        );
    }

    #[test]
    fn test_empty_elements_are_malformed() {
        let strings = Vec::<String>::descriptor();
        for text in [r#"["a",]"#, "[,]", r#"["a",,"b"]"#, r#"[ "a", , "b"]"#] {
            let result = decode(text, &strings);
            assert!(
                matches!(result, Err(Error::MalformedInput { .. })),
                "{} gave {:?}",
                text,
                result
            );
        }

        assert!(matches!(
            decode("[1,]", &Vec::<i32>::descriptor()),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            decode(r#"{"title": }"#, &job()),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            decode(r#"{"title": "a", "salary":}"#, &job()),
            Err(Error::MalformedInput { .. })
        ));

        // An explicitly empty string is still a value
        assert_eq!(
            decode(r#"["", "b"]"#, &strings).unwrap(),
            Value::Array(vec![Value::from(""), Value::from("b")])
        );
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Meters(f64);

    #[test]
    fn test_value_deserializer() {
        let color: Color =
            de::Deserialize::deserialize(ValueDeserializer::new(Value::from("Green"))).unwrap();
        assert_eq!(color, Color::Green);

        let missing: Option<Color> =
            de::Deserialize::deserialize(ValueDeserializer::new(Value::Null)).unwrap();
        assert_eq!(missing, None);

        let meters: Meters =
            de::Deserialize::deserialize(ValueDeserializer::new(Value::from(2.5))).unwrap();
        assert_eq!(meters, Meters(2.5));

        let initial: char =
            de::Deserialize::deserialize(ValueDeserializer::new(Value::from('Q'))).unwrap();
        assert_eq!(initial, 'Q');

        let bad: Result<Color> =
            de::Deserialize::deserialize(ValueDeserializer::new(Value::from(1)));
        assert!(matches!(bad, Err(Error::UnsupportedType(_))));
        let _ = Color::Red;
    }
}
