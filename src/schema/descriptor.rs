// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Type descriptors that drive marshaling decisions.
//!
//! A descriptor is derived once from an interface description and is never
//! mutated afterwards. Records are shared behind an `Arc` so that every
//! parameter, list element and nested field referring to the same record type
//! points at one definition.

use std::fmt;
use std::sync::Arc;

use crate::marshal::{NativeValue, RecordValue};

/// Marshaling class of an atomic type.
///
/// JSON values are matched against the kind only; the wire width carried by
/// [`ScalarType`] is used for range checks and for lowering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomicKind {
    Int,
    Float,
    String,
    Bool,
}

impl fmt::Display for AtomicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AtomicKind::Int => "int",
            AtomicKind::Float => "float",
            AtomicKind::String => "string",
            AtomicKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// Scalar type as declared in the interface description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    S8,
    S16,
    S32,
    S64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    String,
}

impl ScalarType {
    pub fn kind(self) -> AtomicKind {
        match self {
            ScalarType::Bool => AtomicKind::Bool,
            ScalarType::S8
            | ScalarType::S16
            | ScalarType::S32
            | ScalarType::S64
            | ScalarType::U8
            | ScalarType::U16
            | ScalarType::U32
            | ScalarType::U64 => AtomicKind::Int,
            ScalarType::F32 | ScalarType::F64 => AtomicKind::Float,
            ScalarType::Char | ScalarType::String => AtomicKind::String,
        }
    }

    /// Inclusive range of an integer scalar, `None` for non-integers.
    pub fn int_range(self) -> Option<(i128, i128)> {
        match self {
            ScalarType::S8 => Some((i8::MIN.into(), i8::MAX.into())),
            ScalarType::S16 => Some((i16::MIN.into(), i16::MAX.into())),
            ScalarType::S32 => Some((i32::MIN.into(), i32::MAX.into())),
            ScalarType::S64 => Some((i64::MIN.into(), i64::MAX.into())),
            ScalarType::U8 => Some((0, u8::MAX.into())),
            ScalarType::U16 => Some((0, u16::MAX.into())),
            ScalarType::U32 => Some((0, u32::MAX.into())),
            ScalarType::U64 => Some((0, u64::MAX.into())),
            _ => None,
        }
    }

    pub fn wit_name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::S8 => "s8",
            ScalarType::S16 => "s16",
            ScalarType::S32 => "s32",
            ScalarType::S64 => "s64",
            ScalarType::U8 => "u8",
            ScalarType::U16 => "u16",
            ScalarType::U32 => "u32",
            ScalarType::U64 => "u64",
            ScalarType::F32 => "f32",
            ScalarType::F64 => "f64",
            ScalarType::Char => "char",
            ScalarType::String => "string",
        }
    }
}

/// A record definition: a name and its fields in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<(String, TypeDescriptor)>,
}

impl RecordType {
    pub fn new(name: impl Into<String>, fields: Vec<(String, TypeDescriptor)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Native constructor for this record.
    ///
    /// `values` must be in declared field order; they are paired with the field
    /// names positionally.
    pub fn construct(&self, values: Vec<NativeValue>) -> RecordValue {
        debug_assert_eq!(values.len(), self.fields.len());
        RecordValue {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|(name, _)| name.clone())
                .zip(values)
                .collect(),
        }
    }
}

/// Closed set of types the marshaler understands.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Atomic(ScalarType),
    /// `list<u8>`: a byte buffer natively, an array of small integers in JSON.
    Bytes,
    List(Box<TypeDescriptor>),
    Record(Arc<RecordType>),
}

impl TypeDescriptor {
    pub fn list(element: TypeDescriptor) -> Self {
        TypeDescriptor::List(Box::new(element))
    }

    pub fn record(record: RecordType) -> Self {
        TypeDescriptor::Record(Arc::new(record))
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, TypeDescriptor::Atomic(_))
    }

    /// Element type of a list. `Bytes` reports `u8`.
    pub fn element_type(&self) -> Option<TypeDescriptor> {
        match self {
            TypeDescriptor::List(element) => Some((**element).clone()),
            TypeDescriptor::Bytes => Some(TypeDescriptor::Atomic(ScalarType::U8)),
            _ => None,
        }
    }

    /// Ordered fields of a record.
    pub fn fields(&self) -> Option<&[(String, TypeDescriptor)]> {
        match self {
            TypeDescriptor::Record(record) => Some(&record.fields),
            _ => None,
        }
    }

    /// Short name of the descriptor's tag, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDescriptor::Atomic(_) => "atomic",
            TypeDescriptor::Bytes => "bytes",
            TypeDescriptor::List(_) => "list",
            TypeDescriptor::Record(_) => "record",
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Atomic(scalar) => f.write_str(scalar.wit_name()),
            TypeDescriptor::Bytes => f.write_str("list<u8>"),
            TypeDescriptor::List(element) => write!(f, "list<{}>", element),
            TypeDescriptor::Record(record) => write!(f, "record {}", record.name),
        }
    }
}

/// Declared signature of one callable function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    /// Export names leading to the function inside the component, outermost first.
    pub export_path: Vec<String>,
    pub params: Vec<(String, TypeDescriptor)>,
    pub result: Option<TypeDescriptor>,
}

impl FunctionSignature {
    pub fn param_types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.params.iter().map(|(_, ty)| ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> RecordType {
        RecordType::new(
            "bar",
            vec![
                ("name".to_string(), TypeDescriptor::Atomic(ScalarType::String)),
                ("age".to_string(), TypeDescriptor::Atomic(ScalarType::S32)),
            ],
        )
    }

    #[test]
    fn test_traversal_helpers() {
        let list = TypeDescriptor::list(TypeDescriptor::Atomic(ScalarType::S32));
        assert!(!list.is_atomic());
        assert_eq!(
            list.element_type(),
            Some(TypeDescriptor::Atomic(ScalarType::S32))
        );
        assert!(list.fields().is_none());

        let record = TypeDescriptor::record(bar());
        let fields = record.fields().unwrap();
        assert_eq!(fields[0].0, "name");
        assert_eq!(fields[1].0, "age");
        assert!(record.element_type().is_none());

        assert!(TypeDescriptor::Atomic(ScalarType::Bool).is_atomic());
        assert_eq!(
            TypeDescriptor::Bytes.element_type(),
            Some(TypeDescriptor::Atomic(ScalarType::U8))
        );
    }

    #[test]
    fn test_scalar_kinds() {
        assert_eq!(ScalarType::U16.kind(), AtomicKind::Int);
        assert_eq!(ScalarType::F32.kind(), AtomicKind::Float);
        assert_eq!(ScalarType::Char.kind(), AtomicKind::String);
        assert_eq!(ScalarType::Bool.kind(), AtomicKind::Bool);
        assert_eq!(ScalarType::U8.int_range(), Some((0, 255)));
        assert_eq!(ScalarType::U64.int_range(), Some((0, i128::from(u64::MAX))));
        assert_eq!(ScalarType::String.int_range(), None);
    }

    #[test]
    fn test_display_uses_wit_syntax() {
        let nested = TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::Atomic(
            ScalarType::F64,
        )));
        assert_eq!(nested.to_string(), "list<list<f64>>");
        assert_eq!(TypeDescriptor::Bytes.to_string(), "list<u8>");
        assert_eq!(TypeDescriptor::record(bar()).to_string(), "record bar");
    }

    #[test]
    fn test_construct_pairs_values_in_declared_order() {
        let value = bar().construct(vec![
            NativeValue::String("meow".to_string()),
            NativeValue::Int(22),
        ]);
        assert_eq!(value.name, "bar");
        assert_eq!(value.fields[0], ("name".to_string(), NativeValue::String("meow".to_string())));
        assert_eq!(value.fields[1], ("age".to_string(), NativeValue::Int(22)));
    }
}
