// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // wasmtime runtime
pub mod bindings;      // binding cache + generator
pub mod config;        // settings resolution
pub mod engine;        // orchestration, batch, expectations
pub mod errors;        // error handling
pub mod marshal;       // JSON <-> native values
pub mod observability;
pub mod schema;        // type descriptors from interface descriptions
pub mod traits;        // runtime abstraction
