use serde::ser::{self, Serialize};

use crate::value::convert::key_text;
use crate::value::types::*;

/// Error raised by a `Serialize` impl while classifying its value.
///
/// The serializer itself accepts every shape of the serde data model; only
/// a type's own `Serialize` code can fail.
#[derive(Debug, thiserror::Error)]
#[error("Failed to classify value: {0}")]
pub struct SerializeError(String);

impl ser::Error for SerializeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        SerializeError(msg.to_string())
    }
}

/// Serializer building a `Value` directly from the serde data model.
///
/// Numbers stay `f64`, non-finite ones included. Map keys of any shape become
/// strings through `key_text`. Enum variants follow the external tagging
/// serde uses by default: a unit variant is its name, any other variant is a
/// one-entry mapping from its name to its content.
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = SerializeError;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = SerializeList;
    type SerializeTupleVariant = SerializeVariant<SerializeList>;
    type SerializeMap = SerializeMapping;
    type SerializeStruct = SerializeMapping;
    type SerializeStructVariant = SerializeVariant<SerializeMapping>;

    fn serialize_bool(self, v: bool) -> Result<Value, SerializeError> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value, SerializeError> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value, SerializeError> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value, SerializeError> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value, SerializeError> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value, SerializeError> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value, SerializeError> {
        Ok(Value::from(v.to_vec()))
    }

    fn serialize_none(self) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value, SerializeError> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value, SerializeError> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value, SerializeError> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value, SerializeError> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value, SerializeError> {
        let mapping = Mapping::default();
        mapping.insert(variant, value.serialize(self)?);
        Ok(Value::Mapping(mapping))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeList, SerializeError> {
        Ok(SerializeList::default())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeList, SerializeError> {
        Ok(SerializeList::default())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<SerializeList, SerializeError> {
        Ok(SerializeList::default())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVariant<SerializeList>, SerializeError> {
        Ok(SerializeVariant {
            variant,
            content: SerializeList::default(),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMapping, SerializeError> {
        Ok(SerializeMapping::default())
    }

    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<SerializeMapping, SerializeError> {
        Ok(SerializeMapping::default())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVariant<SerializeMapping>, SerializeError> {
        Ok(SerializeVariant {
            variant,
            content: SerializeMapping::default(),
        })
    }
}

#[derive(Default)]
pub struct SerializeList {
    list: List,
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        self.list.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(Value::List(self.list))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, SerializeError> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeList {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value, SerializeError> {
        ser::SerializeSeq::end(self)
    }
}

#[derive(Default)]
pub struct SerializeMapping {
    mapping: Mapping,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMapping {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), SerializeError> {
        self.next_key = Some(key_text(&key.serialize(ValueSerializer)?));
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| <SerializeError as ser::Error>::custom("map value without a key"))?;
        self.mapping.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(Value::Mapping(self.mapping))
    }
}

impl ser::SerializeStruct for SerializeMapping {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerializeError> {
        self.mapping.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(Value::Mapping(self.mapping))
    }
}

/// Content of a tuple or struct variant, wrapped under the variant name on `end`.
pub struct SerializeVariant<C> {
    variant: &'static str,
    content: C,
}

impl SerializeVariant<SerializeList> {
    fn wrap(self) -> Value {
        let mapping = Mapping::default();
        mapping.insert(self.variant, Value::List(self.content.list));
        Value::Mapping(mapping)
    }
}

impl SerializeVariant<SerializeMapping> {
    fn wrap(self) -> Value {
        let mapping = Mapping::default();
        mapping.insert(self.variant, Value::Mapping(self.content.mapping));
        Value::Mapping(mapping)
    }
}

impl ser::SerializeTupleVariant for SerializeVariant<SerializeList> {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), SerializeError> {
        ser::SerializeSeq::serialize_element(&mut self.content, value)
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(self.wrap())
    }
}

impl ser::SerializeStructVariant for SerializeVariant<SerializeMapping> {
    type Ok = Value;
    type Error = SerializeError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), SerializeError> {
        ser::SerializeStruct::serialize_field(&mut self.content, key, value)
    }

    fn end(self) -> Result<Value, SerializeError> {
        Ok(self.wrap())
    }
}
