// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for loading and compiling WebAssembly binaries.
//!
//! Call-time failures are not represented here; they are reported as
//! [`crate::errors::WritError::InvocationFailure`] by the executors.

use thiserror::Error;

/// Error message for unsupported legacy Preview 1 Component Model binaries.
pub const WASM_UNSUPPORTED_ENCODING: &str = "Unsupported WASM binary: Legacy Preview 1 Component Model detected. \
Please upgrade to modern Component Model (binary version 2+) or use a core WASM module.";

#[derive(Error, Debug)]
pub enum WasmError {
    /// Invalid or malformed WASM binary format.
    #[error("Invalid WASM binary: {0}")]
    InvalidWasmBinary(String),

    /// Unsupported WASM encoding (e.g., legacy Preview 1).
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Input validation error (size limits).
    #[error("Invalid input: {0}")]
    ValidationError(String),

    /// File I/O error during module loading.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Wasmtime engine creation or configuration error.
    #[error("Engine creation error: {0}")]
    EngineError(String),

    /// Module or component compilation error.
    #[error("WASM module error: {0}")]
    ModuleError(String),

    /// WASM binary parsing error from wasmparser.
    #[error("WASM parser error: {0}")]
    ParserError(#[from] wasmparser::BinaryReaderError),
}

pub type WasmResult<T> = Result<T, WasmError>;
