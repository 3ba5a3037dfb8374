// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wasmtime engine configuration.

use wasmtime::{Config, Engine};

use crate::backends::wasm::detector::BinaryKind;
use crate::backends::wasm::error::{WasmError, WasmResult};
use crate::observability::messages::wasm::EngineCreated;

/// Create an engine configured for `kind`.
///
/// Components get the Component Model enabled; core modules do not.
/// `debug_info` turns on DWARF debug info so traps carry source locations.
pub fn create_engine(kind: BinaryKind, debug_info: bool) -> WasmResult<Engine> {
    let mut config = Config::new();

    config.wasm_component_model(kind.is_component());
    config.debug_info(debug_info);
    config.wasm_threads(false);
    config.wasm_memory64(false);

    let engine = Engine::new(&config).map_err(|e| WasmError::EngineError(e.to_string()))?;
    tracing::debug!("{}", EngineCreated { kind, debug_info });
    Ok(engine)
}
