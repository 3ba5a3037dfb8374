// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wasmtime backend: loading, detection, engine setup and the two execution
//! paths.

mod detector;
mod engine;
mod error;
mod executors;
mod loader;
mod lower;
mod runtime;

pub use detector::{detect_binary_kind, BinaryKind};
pub use engine::create_engine;
pub use error::{WasmError, WasmResult, WASM_UNSUPPORTED_ENCODING};
pub use executors::{ComponentExecutor, ModuleExecutor};
pub use loader::{load_wasm_bytes, MAX_WASM_SIZE};
pub use runtime::{LoadedModule, WasmArtifact, WasmtimeRuntime};
