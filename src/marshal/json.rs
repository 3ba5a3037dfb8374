// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{Map, Number, Value};

use crate::errors::{WritError, WritResult};
use crate::marshal::NativeValue;

/// Convert a native value back to JSON.
///
/// Records keep their declared field order. Byte buffers become arrays of
/// integers. Non-finite floats have no JSON form and fail.
pub fn to_json(value: &NativeValue) -> WritResult<Value> {
    Ok(match value {
        NativeValue::Null => Value::Null,
        NativeValue::Bool(b) => Value::Bool(*b),
        NativeValue::Int(n) => Value::Number((*n).into()),
        NativeValue::UInt(n) => Value::Number((*n).into()),
        NativeValue::Float(f) => Number::from_f64(*f)
            .map(Value::Number)
            .ok_or_else(|| WritError::SerializationFailure(format!("{f} is not a JSON number")))?,
        NativeValue::String(s) => Value::String(s.clone()),
        NativeValue::Bytes(bytes) => {
            Value::Array(bytes.iter().map(|b| Value::Number((*b).into())).collect())
        }
        NativeValue::List(items) => {
            Value::Array(items.iter().map(to_json).collect::<WritResult<_>>()?)
        }
        NativeValue::Record(record) => {
            let mut object = Map::with_capacity(record.fields.len());
            for (name, field) in &record.fields {
                object.insert(name.clone(), to_json(field)?);
            }
            Value::Object(object)
        }
    })
}
