// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Conversion between native values and wasmtime component values.
//!
//! Lowering follows the declared descriptor so integers land in the declared
//! width. Lifting follows the runtime value and uses the descriptor only to
//! recover byte buffers and record names.

use wasmtime::component::Val;

use crate::marshal::{NativeValue, RecordValue};
use crate::schema::{ScalarType, TypeDescriptor};

pub fn lower(value: &NativeValue, ty: &TypeDescriptor) -> Result<Val, String> {
    match (value, ty) {
        (NativeValue::Bool(b), TypeDescriptor::Atomic(ScalarType::Bool)) => Ok(Val::Bool(*b)),
        (NativeValue::Int(n), TypeDescriptor::Atomic(scalar)) => lower_int(i128::from(*n), *scalar),
        (NativeValue::UInt(n), TypeDescriptor::Atomic(scalar)) => lower_int(i128::from(*n), *scalar),
        (NativeValue::Float(f), TypeDescriptor::Atomic(ScalarType::F32)) => {
            Ok(Val::Float32(*f as f32))
        }
        (NativeValue::Float(f), TypeDescriptor::Atomic(ScalarType::F64)) => Ok(Val::Float64(*f)),
        (NativeValue::String(s), TypeDescriptor::Atomic(ScalarType::Char)) => s
            .chars()
            .next()
            .map(Val::Char)
            .ok_or_else(|| "empty string for char".to_string()),
        (NativeValue::String(s), TypeDescriptor::Atomic(ScalarType::String)) => {
            Ok(Val::String(s.as_str().into()))
        }
        (NativeValue::Bytes(bytes), TypeDescriptor::Bytes) => {
            Ok(Val::List(bytes.iter().copied().map(Val::U8).collect()))
        }
        (NativeValue::List(items), TypeDescriptor::List(element)) => items
            .iter()
            .map(|item| lower(item, element))
            .collect::<Result<_, _>>()
            .map(Val::List),
        (NativeValue::Record(record), TypeDescriptor::Record(declared)) => record
            .fields
            .iter()
            .zip(&declared.fields)
            .map(|((name, field), (_, field_ty))| Ok((name.clone(), lower(field, field_ty)?)))
            .collect::<Result<_, String>>()
            .map(Val::Record),
        (value, ty) => Err(format!("cannot lower {} as {}", value.type_name(), ty)),
    }
}

fn lower_int(n: i128, scalar: ScalarType) -> Result<Val, String> {
    let out_of_range = |_| format!("{n} out of range for {}", scalar.wit_name());
    Ok(match scalar {
        ScalarType::S8 => Val::S8(i8::try_from(n).map_err(out_of_range)?),
        ScalarType::S16 => Val::S16(i16::try_from(n).map_err(out_of_range)?),
        ScalarType::S32 => Val::S32(i32::try_from(n).map_err(out_of_range)?),
        ScalarType::S64 => Val::S64(i64::try_from(n).map_err(out_of_range)?),
        ScalarType::U8 => Val::U8(u8::try_from(n).map_err(out_of_range)?),
        ScalarType::U16 => Val::U16(u16::try_from(n).map_err(out_of_range)?),
        ScalarType::U32 => Val::U32(u32::try_from(n).map_err(out_of_range)?),
        ScalarType::U64 => Val::U64(u64::try_from(n).map_err(out_of_range)?),
        other => return Err(format!("cannot lower int as {}", other.wit_name())),
    })
}

pub fn lift(value: &Val, ty: Option<&TypeDescriptor>) -> Result<NativeValue, String> {
    Ok(match value {
        Val::Bool(b) => NativeValue::Bool(*b),
        Val::S8(n) => NativeValue::Int(i64::from(*n)),
        Val::S16(n) => NativeValue::Int(i64::from(*n)),
        Val::S32(n) => NativeValue::Int(i64::from(*n)),
        Val::S64(n) => NativeValue::Int(*n),
        Val::U8(n) => NativeValue::Int(i64::from(*n)),
        Val::U16(n) => NativeValue::Int(i64::from(*n)),
        Val::U32(n) => NativeValue::Int(i64::from(*n)),
        Val::U64(n) => NativeValue::from_u64(*n),
        Val::Float32(f) => NativeValue::Float(f64::from(*f)),
        Val::Float64(f) => NativeValue::Float(*f),
        Val::Char(c) => NativeValue::String(c.to_string()),
        Val::String(s) => NativeValue::String(s.to_string()),
        Val::List(items) => match ty {
            Some(TypeDescriptor::Bytes) => NativeValue::Bytes(
                items
                    .iter()
                    .map(|item| match item {
                        Val::U8(b) => Ok(*b),
                        other => Err(format!("expected u8 in byte list, got {:?}", other)),
                    })
                    .collect::<Result<_, _>>()?,
            ),
            _ => {
                let element = ty.and_then(TypeDescriptor::element_type);
                NativeValue::List(
                    items
                        .iter()
                        .map(|item| lift(item, element.as_ref()))
                        .collect::<Result<_, _>>()?,
                )
            }
        },
        Val::Record(fields) => {
            let declared = ty.and_then(TypeDescriptor::fields);
            let name = match ty {
                Some(TypeDescriptor::Record(record)) => record.name.clone(),
                _ => "record".to_string(),
            };
            let mut lifted = Vec::with_capacity(fields.len());
            for (field_name, field) in fields {
                let field_ty = declared.and_then(|declared| {
                    declared
                        .iter()
                        .find(|(declared_name, _)| declared_name == field_name)
                        .map(|(_, ty)| ty)
                });
                lifted.push((field_name.clone(), lift(field, field_ty)?));
            }
            NativeValue::Record(RecordValue {
                name,
                fields: lifted,
            })
        }
        Val::Option(None) => NativeValue::Null,
        Val::Option(Some(inner)) => lift(inner, ty)?,
        other => return Err(format!("result type not supported: {:?}", other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::RecordType;

    fn point() -> TypeDescriptor {
        TypeDescriptor::record(RecordType::new(
            "point",
            vec![
                ("x".to_string(), TypeDescriptor::Atomic(ScalarType::S16)),
                ("y".to_string(), TypeDescriptor::Atomic(ScalarType::U8)),
            ],
        ))
    }

    #[test]
    fn test_lowering_uses_declared_widths() {
        let value = NativeValue::Record(RecordValue {
            name: "point".to_string(),
            fields: vec![
                ("x".to_string(), NativeValue::Int(-3)),
                ("y".to_string(), NativeValue::Int(200)),
            ],
        });
        match lower(&value, &point()).unwrap() {
            Val::Record(fields) => {
                assert!(matches!(fields[0], (ref name, Val::S16(-3)) if name == "x"));
                assert!(matches!(fields[1], (ref name, Val::U8(200)) if name == "y"));
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_lowering_rejects_out_of_range() {
        let err = lower(&NativeValue::Int(300), &TypeDescriptor::Atomic(ScalarType::U8)).unwrap_err();
        assert!(err.contains("out of range"));
        assert!(lower(&NativeValue::Bool(true), &TypeDescriptor::Atomic(ScalarType::S32)).is_err());
    }

    #[test]
    fn test_lift_bytes_and_records() {
        let bytes = Val::List(vec![Val::U8(104), Val::U8(105)]);
        assert_eq!(
            lift(&bytes, Some(&TypeDescriptor::Bytes)).unwrap(),
            NativeValue::Bytes(vec![104, 105])
        );

        let record = Val::Record(vec![
            ("x".to_string(), Val::S16(1)),
            ("y".to_string(), Val::U8(2)),
        ]);
        match lift(&record, Some(&point())).unwrap() {
            NativeValue::Record(value) => {
                assert_eq!(value.name, "point");
                assert_eq!(value.get("y"), Some(&NativeValue::Int(2)));
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_full_u64_range() {
        let u64_ty = TypeDescriptor::Atomic(ScalarType::U64);
        assert!(matches!(lower(&NativeValue::UInt(u64::MAX), &u64_ty), Ok(Val::U64(u64::MAX))));
        assert!(lower(&NativeValue::UInt(u64::MAX), &TypeDescriptor::Atomic(ScalarType::S64)).is_err());

        assert_eq!(lift(&Val::U64(u64::MAX), Some(&u64_ty)).unwrap(), NativeValue::UInt(u64::MAX));
        assert_eq!(lift(&Val::U64(7), Some(&u64_ty)).unwrap(), NativeValue::Int(7));
    }

    #[test]
    fn test_lift_absent_option_is_null() {
        assert_eq!(lift(&Val::Option(None), None).unwrap(), NativeValue::Null);
    }
}
