// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reading WASM binaries from disk.
//!
//! Only the size is checked here. Format detection belongs to the detector
//! and compilation to the runtime.

use std::path::Path;

use crate::backends::wasm::error::{WasmError, WasmResult};
use crate::observability::messages::wasm::{ModuleLoadFailed, ModuleLoaded};

/// Maximum allowed size for WASM binaries (16 MB)
pub const MAX_WASM_SIZE: usize = 16 * 1024 * 1024;

/// Read the binary at `path`, rejecting files over [`MAX_WASM_SIZE`].
pub fn load_wasm_bytes(path: &Path) -> WasmResult<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| report(path, WasmError::IoError(e)))?;

    if bytes.len() > MAX_WASM_SIZE {
        return Err(report(
            path,
            WasmError::ValidationError(format!(
                "WASM file too large: {} bytes (max: {} bytes)",
                bytes.len(),
                MAX_WASM_SIZE
            )),
        ));
    }

    tracing::debug!(
        "{}",
        ModuleLoaded {
            module_path: path,
            size_bytes: bytes.len(),
        }
    );
    Ok(bytes)
}

fn report(path: &Path, error: WasmError) -> WasmError {
    tracing::error!(
        "{}",
        ModuleLoadFailed {
            module_path: path,
            error: &error,
        }
    );
    error
}
