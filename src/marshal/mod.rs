// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Type-directed conversion between JSON and native values.
//!
//! The descriptor decides; the JSON value only has to agree. No coercion is
//! attempted: an integer is never accepted where a float is declared, and a
//! record never silently drops keys it does not declare.

mod json;
mod native;
mod value;

pub use json::to_json;
pub use native::{to_native, to_native_args};
pub use value::{NativeValue, RecordValue};
