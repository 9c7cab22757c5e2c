//! `serde::Serializer` that builds a [`Value`] tree.
//!
//! Enum variants follow the externally tagged convention: unit variants
//! become their name as a string, every other variant a single-entry map
//! from the name to the payload.

use serde::ser::{self, Serialize};

use crate::{Map, MsgPackError, Value};

/// Converts any `T: Serialize` into a [`Value`].
///
/// Fails with [`MsgPackError::UnrepresentableValue`] for 128-bit integers
/// outside the 64-bit ranges.
pub fn to_value<T: ?Sized + Serialize>(value: &T) -> Result<Value, MsgPackError> {
    value.serialize(ValueSerializer)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValueSerializer;

fn tagged(variant: &'static str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(Value::Str(variant.to_owned()), value);
    Value::Map(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = MsgPackError;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value, MsgPackError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, MsgPackError> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, MsgPackError> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, MsgPackError> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, MsgPackError> {
        Ok(Value::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, MsgPackError> {
        i64::try_from(v)
            .map(Value::Int)
            .map_err(|_| MsgPackError::unrepresentable("i128"))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, MsgPackError> {
        Ok(Value::UInt(v as u64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, MsgPackError> {
        Ok(Value::UInt(v as u64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, MsgPackError> {
        Ok(Value::UInt(v as u64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, MsgPackError> {
        Ok(Value::UInt(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, MsgPackError> {
        u64::try_from(v)
            .map(Value::UInt)
            .map_err(|_| MsgPackError::unrepresentable("u128"))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, MsgPackError> {
        Ok(Value::Float32(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, MsgPackError> {
        Ok(Value::Float64(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, MsgPackError> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, MsgPackError> {
        Ok(Value::Str(v.to_owned()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, MsgPackError> {
        Ok(Value::Bin(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value, MsgPackError> {
        Ok(Value::Nil)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, MsgPackError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, MsgPackError> {
        Ok(Value::Nil)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, MsgPackError> {
        Ok(Value::Nil)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, MsgPackError> {
        Ok(Value::Str(variant.to_owned()))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, MsgPackError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, MsgPackError> {
        Ok(tagged(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec, MsgPackError> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec, MsgPackError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<SerializeVec, MsgPackError> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant, MsgPackError> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap, MsgPackError> {
        Ok(SerializeMap {
            map: Map::with_capacity(len.unwrap_or(0)),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap, MsgPackError> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant, MsgPackError> {
        Ok(SerializeStructVariant {
            variant,
            map: Map::with_capacity(len),
        })
    }
}

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Map,
    next_key: Option<Value>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: Map,
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = MsgPackError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), MsgPackError> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, MsgPackError> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = MsgPackError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), MsgPackError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, MsgPackError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = MsgPackError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), MsgPackError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, MsgPackError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = MsgPackError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), MsgPackError> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, MsgPackError> {
        Ok(tagged(self.variant, Value::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = MsgPackError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), MsgPackError> {
        self.next_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), MsgPackError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| MsgPackError::Custom("map value serialized before its key".into()))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, MsgPackError> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = MsgPackError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), MsgPackError> {
        self.map.insert(Value::Str(key.to_owned()), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, MsgPackError> {
        Ok(Value::Map(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = MsgPackError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), MsgPackError> {
        self.map.insert(Value::Str(key.to_owned()), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value, MsgPackError> {
        Ok(tagged(self.variant, Value::Map(self.map)))
    }
}
