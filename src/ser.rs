//! Encoding.
//!
//! This module provides the [`Serializer`] that writes any `Serialize` type
//! as text, and the [`ValueSerializer`] behind [`to_value`](crate::to_value).
//!
//! ## Overview
//!
//! - **Scalars**: strings and chars are wrapped in double quotes, everything
//!   else is written in its plain form
//! - **Sequences**: `[a, b, c]`
//! - **Composites** (structs and maps): `{"name": value, ...}`, attributes in
//!   the order the type reports them
//! - **Null**: `None` and `()` are written as `null`
//!
//! ## Depth guard
//!
//! Every composite entered while encoding holds a depth guard that is
//! released when the composite is finished or abandoned. Going past
//! [`CodecOptions::max_depth`] composites (10 by default) fails with
//! [`Error::DepthExceeded`] instead of recursing without bound through a
//! cyclic object graph. Sequences do not count towards the bound.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_shape::{CodecOptions, Serializer};
//! use serde::Serialize;
//!
//! let mut serializer = Serializer::new(CodecOptions::new());
//! vec![1, 2, 3].serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), "[1, 2, 3]");
//! ```

use crate::tokenizer::NULL;
use crate::{CodecOptions, Error, Number, Result, Value, ValueMap};
use serde::{ser, Serialize};

/// The text serializer.
///
/// One `Serializer` serves one top-level encode call; its depth accounting
/// is not shared with any other call.
pub struct Serializer {
    output: String,
    options: CodecOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: CodecOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Number of composites currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn write_quoted(&mut self, s: &str) {
        self.output.push('"');
        self.output.push_str(s);
        self.output.push('"');
    }

    fn write_indent(&mut self, level: usize) {
        if self.options.pretty {
            self.output.push('\n');
            for _ in 0..level * self.options.indent {
                self.output.push(' ');
            }
        }
    }

    fn open_composite(&mut self) -> Result<DepthGuard<'_>> {
        let guard = DepthGuard::acquire(self)?;
        tracing::trace!(depth = guard.ser.depth, "encoding composite");
        guard.ser.output.push('{');
        Ok(guard)
    }
}

/// Holds one level of composite depth for as long as it lives.
struct DepthGuard<'a> {
    ser: &'a mut Serializer,
}

impl<'a> DepthGuard<'a> {
    fn acquire(ser: &'a mut Serializer) -> Result<Self> {
        let max = ser.options.max_depth;
        if ser.depth >= max {
            tracing::debug!(max, "composite depth guard tripped");
            return Err(Error::depth_exceeded(max));
        }
        ser.depth += 1;
        Ok(DepthGuard { ser })
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.ser.depth -= 1;
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = SeqSerializer<'a>;
    type SerializeTupleStruct = SeqSerializer<'a>;
    type SerializeTupleVariant = ser::Impossible<(), Error>;
    type SerializeMap = MapSerializer<'a>;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = ser::Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.output.push_str(&v.to_string());
        Ok(())
    }

    // Written at f32 precision so the shortest representation survives.
    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        if !v.is_finite() {
            return self.serialize_unit();
        }
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        if !v.is_finite() {
            return self.serialize_unit();
        }
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        let mut buf = [0u8; 4];
        self.write_quoted(v.encode_utf8(&mut buf));
        Ok(())
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write_quoted(v);
        Ok(())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        use ser::SerializeSeq;
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str(NULL);
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        Err(data_variant(name, variant))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        tracing::trace!(depth = self.depth, "encoding sequence");
        self.output.push('[');
        Ok(SeqSerializer {
            ser: self,
            first: true,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(data_variant(name, variant))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            guard: self.open_composite()?,
            first: true,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(StructSerializer {
            guard: self.open_composite()?,
            first: true,
        })
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(data_variant(name, variant))
    }
}

fn data_variant(name: &str, variant: &str) -> Error {
    Error::unsupported_type(&format!(
        "enum variant {}::{} carries data; only unit variants are encodable",
        name, variant
    ))
}

pub struct SeqSerializer<'a> {
    ser: &'a mut Serializer,
    first: bool,
}

impl<'a> SeqSerializer<'a> {
    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if !self.first {
            self.ser.output.push_str(", ");
        }
        self.first = false;
        value.serialize(&mut *self.ser)
    }

    fn finish(self) -> Result<()> {
        self.ser.output.push(']');
        Ok(())
    }
}

impl<'a> ser::SerializeSeq for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTuple for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleStruct for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Writes the separator and `"name": ` prefix of one attribute.
fn write_attribute_name(guard: &mut DepthGuard<'_>, first: &mut bool, name: &str) {
    let ser = &mut *guard.ser;
    if !*first {
        ser.output.push(',');
        if !ser.options.pretty {
            ser.output.push(' ');
        }
    }
    *first = false;
    let level = ser.depth;
    ser.write_indent(level);
    ser.write_quoted(name);
    ser.output.push_str(": ");
}

fn close_composite(guard: DepthGuard<'_>, first: bool) -> Result<()> {
    let ser = &mut *guard.ser;
    if !first {
        let level = ser.depth - 1;
        ser.write_indent(level);
    }
    ser.output.push('}');
    Ok(())
}

pub struct StructSerializer<'a> {
    guard: DepthGuard<'a>,
    first: bool,
}

impl<'a> ser::SerializeStruct for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        write_attribute_name(&mut self.guard, &mut self.first, key);
        value.serialize(&mut *self.guard.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        close_composite(self.guard, self.first)
    }
}

pub struct MapSerializer<'a> {
    guard: DepthGuard<'a>,
    first: bool,
}

impl<'a> ser::SerializeMap for MapSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let name = match to_value(key)? {
            Value::String(s) => s,
            Value::Char(c) => c.to_string(),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "map keys must be strings, found {:?}",
                    other
                )))
            }
        };
        write_attribute_name(&mut self.guard, &mut self.first, &name);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(&mut *self.guard.ser)
    }

    fn end(self) -> Result<Self::Ok> {
        close_composite(self.guard, self.first)
    }
}

/// Serializer producing a [`Value`] tree instead of text.
///
/// The number of enclosing composites is threaded through by value, so each
/// nested call carries its own count.
#[derive(Clone, Copy, Debug)]
pub struct ValueSerializer {
    depth: usize,
    max_depth: usize,
}

impl ValueSerializer {
    pub fn new(options: &CodecOptions) -> Self {
        ValueSerializer {
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn enter_composite(self) -> Result<Self> {
        if self.depth >= self.max_depth {
            tracing::debug!(max = self.max_depth, "composite depth guard tripped");
            return Err(Error::depth_exceeded(self.max_depth));
        }
        Ok(ValueSerializer {
            depth: self.depth + 1,
            ..self
        })
    }
}

impl Default for ValueSerializer {
    fn default() -> Self {
        ValueSerializer::new(&CodecOptions::default())
    }
}

pub struct SerializeVec {
    vec: Vec<Value>,
    inner: ValueSerializer,
}

pub struct SerializeMap {
    map: ValueMap,
    current_key: Option<String>,
    inner: ValueSerializer,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(Number::Float(f64::from(v))))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Char(v))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(data_variant(name, variant))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
            inner: self,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(data_variant(name, variant))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            map: ValueMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
            inner: self.enter_composite()?,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(data_variant(name, variant))
    }
}

impl SerializeVec {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(value.serialize(self.inner)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(self.inner)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            Value::Char(c) => {
                self.current_key = Some(c.to_string());
                Ok(())
            }
            other => Err(Error::unsupported_type(&format!(
                "map keys must be strings, found {:?}",
                other
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, value.serialize(self.inner)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), value.serialize(self.inner)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer::default())
}
