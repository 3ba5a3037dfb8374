// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// A value already shaped to a declared type, ready to be lowered into the
/// runtime or lifted back out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Bool(bool),
    Int(i64),
    /// Unsigned integer above `i64::MAX`; smaller values are always `Int`.
    UInt(u64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<NativeValue>),
    Record(RecordValue),
    /// An absent optional result.
    Null,
}

/// A constructed record. Fields are kept in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordValue {
    pub name: String,
    pub fields: Vec<(String, NativeValue)>,
}

impl RecordValue {
    pub fn get(&self, field: &str) -> Option<&NativeValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

impl NativeValue {
    /// Native integer for `n`, using `UInt` only when `Int` cannot hold it.
    pub fn from_u64(n: u64) -> Self {
        i64::try_from(n).map_or(NativeValue::UInt(n), NativeValue::Int)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Bool(_) => "bool",
            NativeValue::Int(_) | NativeValue::UInt(_) => "int",
            NativeValue::Float(_) => "float",
            NativeValue::String(_) => "string",
            NativeValue::Bytes(_) => "bytes",
            NativeValue::List(_) => "list",
            NativeValue::Record(_) => "record",
            NativeValue::Null => "null",
        }
    }
}
