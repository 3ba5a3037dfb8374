// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{Map, Value};

use crate::errors::{WritError, WritResult};
use crate::marshal::NativeValue;
use crate::schema::{AtomicKind, RecordType, ScalarType, TypeDescriptor};

/// Convert one JSON value to the native value described by `ty`.
///
/// Errors are reported against the position `$0`. Use [`to_native_args`] to
/// get per-argument positions.
pub fn to_native(value: &Value, ty: &TypeDescriptor) -> WritResult<NativeValue> {
    convert(value, ty, "$0")
}

/// Convert positional arguments against declared parameters, in order.
///
/// The first failing argument aborts the conversion.
pub fn to_native_args(
    values: &[Value],
    params: &[(String, TypeDescriptor)],
) -> WritResult<Vec<NativeValue>> {
    if values.len() != params.len() {
        return Err(WritError::TypeMismatch {
            position: "arguments".to_string(),
            value: format!("{} argument(s)", values.len()),
            expected: format!("{} argument(s)", params.len()),
        });
    }
    values
        .iter()
        .zip(params)
        .enumerate()
        .map(|(index, (value, (_, ty)))| convert(value, ty, &format!("${index}")))
        .collect()
}

fn convert(value: &Value, ty: &TypeDescriptor, position: &str) -> WritResult<NativeValue> {
    if value.is_null() {
        return Err(WritError::ArgTypeNotImplemented {
            position: position.to_string(),
            kind: "null".to_string(),
        });
    }
    match ty {
        TypeDescriptor::Atomic(scalar) => atomic(value, *scalar, position),
        TypeDescriptor::Bytes => bytes(value, position),
        TypeDescriptor::List(element) => {
            let items = value
                .as_array()
                .ok_or_else(|| mismatch(value, ty, position))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| convert(item, element, &format!("{position}[{i}]")))
                .collect::<WritResult<Vec<_>>>()
                .map(NativeValue::List)
        }
        TypeDescriptor::Record(record) => {
            let object = value
                .as_object()
                .ok_or_else(|| mismatch(value, ty, position))?;
            self::record(object, record, position)
        }
    }
}

fn atomic(value: &Value, scalar: ScalarType, position: &str) -> WritResult<NativeValue> {
    let ty = TypeDescriptor::Atomic(scalar);
    match scalar.kind() {
        AtomicKind::Bool => value
            .as_bool()
            .map(NativeValue::Bool)
            .ok_or_else(|| mismatch(value, &ty, position)),
        AtomicKind::Int => {
            let n = value
                .as_i64()
                .map(i128::from)
                .or_else(|| value.as_u64().map(i128::from))
                .filter(|_| !value.is_f64())
                .ok_or_else(|| mismatch(value, &ty, position))?;
            match scalar.int_range() {
                Some((min, max)) if n < min || n > max => Err(mismatch(value, &ty, position)),
                _ => match i64::try_from(n) {
                    Ok(n) => Ok(NativeValue::Int(n)),
                    Err(_) => u64::try_from(n)
                        .map(NativeValue::UInt)
                        .map_err(|_| mismatch(value, &ty, position)),
                },
            }
        }
        AtomicKind::Float => {
            if !value.is_f64() {
                return Err(mismatch(value, &ty, position));
            }
            let n = value
                .as_f64()
                .ok_or_else(|| mismatch(value, &ty, position))?;
            if scalar == ScalarType::F32 && n.abs() > f32::MAX as f64 {
                return Err(mismatch(value, &ty, position));
            }
            Ok(NativeValue::Float(n))
        }
        AtomicKind::String => {
            let s = value
                .as_str()
                .ok_or_else(|| mismatch(value, &ty, position))?;
            if scalar == ScalarType::Char && s.chars().count() != 1 {
                return Err(mismatch(value, &ty, position));
            }
            Ok(NativeValue::String(s.to_string()))
        }
    }
}

fn bytes(value: &Value, position: &str) -> WritResult<NativeValue> {
    let items = value
        .as_array()
        .ok_or_else(|| mismatch(value, &TypeDescriptor::Bytes, position))?;
    let byte_type = TypeDescriptor::Atomic(ScalarType::U8);
    let mut buffer = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let byte_position = format!("{position}[{i}]");
        if item.is_null() {
            return Err(WritError::ArgTypeNotImplemented {
                position: byte_position,
                kind: "null".to_string(),
            });
        }
        let byte = item
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| mismatch(item, &byte_type, &byte_position))?;
        buffer.push(byte);
    }
    Ok(NativeValue::Bytes(buffer))
}

fn record(
    object: &Map<String, Value>,
    record: &RecordType,
    position: &str,
) -> WritResult<NativeValue> {
    let mut values = Vec::with_capacity(record.fields.len());
    let mut consumed = 0;
    for (field, ty) in &record.fields {
        let field_position = format!("{position}.{field}");
        let snake = field.replace('-', "_");
        let value = object
            .get(field)
            .or_else(|| object.get(&snake))
            .ok_or_else(|| WritError::TypeMismatch {
                position: field_position.clone(),
                value: "missing field".to_string(),
                expected: ty.to_string(),
            })?;
        consumed += 1;
        values.push(convert(value, ty, &field_position)?);
    }

    if consumed != object.len() {
        let declared = |key: &String| {
            record
                .fields
                .iter()
                .any(|(field, _)| field == key || field.replace('-', "_") == *key)
        };
        if let Some(extra) = object.keys().find(|key| !declared(key)) {
            return Err(WritError::TypeMismatch {
                position: format!("{position}.{extra}"),
                value: "undeclared field".to_string(),
                expected: format!("a field of record {}", record.name),
            });
        }
    }

    Ok(NativeValue::Record(record.construct(values)))
}

fn mismatch(value: &Value, ty: &TypeDescriptor, position: &str) -> WritError {
    WritError::TypeMismatch {
        position: position.to_string(),
        value: value.to_string(),
        expected: ty.to_string(),
    }
}
