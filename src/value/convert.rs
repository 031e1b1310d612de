use anyhow::Result;
use serde::Serialize;

use crate::value::serialize::ValueSerializer;
use crate::value::types::*;

/// Classify a `serde_json::Value` into a renderable `Value`.
///
/// JSON has no cycles, so every list and mapping in the result is a fresh,
/// unshared allocation.
pub fn from_json(json: &serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Array(items) => {
            let list = List::default();
            for item in items {
                list.push(from_json(item));
            }
            Value::List(list)
        }
        serde_json::Value::Object(entries) => {
            let mapping = Mapping::default();
            for (key, item) in entries {
                mapping.insert(key.as_str(), from_json(item));
            }
            Value::Mapping(mapping)
        }
    }
}

/// Classify any serializable value.
///
/// Every shape of the serde data model maps onto one of the six kinds, so
/// this fails only when the value's own `Serialize` impl reports an error.
pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(value.serialize(ValueSerializer)?)
}

/// Text a value takes when used as a mapping key: the leaf text for
/// scalars, elements joined by `,` for lists (`null` elements empty) and
/// `[object Object]` for mappings, as a default string conversion gives.
pub fn key_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(*n),
        Value::String(s) => s.clone(),
        Value::List(list) => list
            .items()
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                item => key_text(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Mapping(_) => "[object Object]".to_string(),
    }
}

/// Default string conversion of a number.
pub fn number_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // Also catches -0
    if n == 0.0 {
        return "0".to_string();
    }

    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", n);
    }

    let exponential = format!("{:e}", n);
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponential,
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        let list = List::default();
        for item in items {
            list.push(item);
        }
        Value::List(list)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Mapping> for Value {
    fn from(mapping: Mapping) -> Self {
        Value::Mapping(mapping)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        from_json(&json)
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        from_json(json)
    }
}
