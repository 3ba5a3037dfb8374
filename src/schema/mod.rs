// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Type schema for marshaling: descriptors and the table resolved from an
//! interface description.

mod descriptor;
mod resolver;

pub use descriptor::{AtomicKind, FunctionSignature, RecordType, ScalarType, TypeDescriptor};
pub use resolver::{InterfaceSchema, SchemaTable};
