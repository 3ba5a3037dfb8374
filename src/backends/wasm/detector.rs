// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! WASM binary encoding detection
//!
//! Distinguishes Component Model components from core modules with
//! `wasmparser`, so the runtime knows which engine configuration and which
//! invocation path apply.

use std::fmt;

use wasmparser::{Encoding, Parser, Payload};

use crate::backends::wasm::error::{WasmError, WASM_UNSUPPORTED_ENCODING};

/// Supported kinds of WebAssembly binary.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryKind {
    /// Component Model binary (version 2+), invoked through typed exports.
    Component,
    /// Core module (version 1), invoked through the plain path.
    CoreModule,
}

impl BinaryKind {
    #[inline]
    pub fn is_component(self) -> bool {
        matches!(self, Self::Component)
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryKind::Component => f.write_str("component"),
            BinaryKind::CoreModule => f.write_str("core module"),
        }
    }
}

/// Detect the kind of a WebAssembly binary from its outermost version header
/// and, for version 1, its custom sections.
///
/// Core modules nested inside a component report their own version header;
/// only the first one describes the binary.
///
/// Legacy Preview 1 components (a core module carrying a `component` custom
/// section) are rejected.
pub fn detect_binary_kind(bytes: &[u8]) -> Result<BinaryKind, WasmError> {
    let mut encoding = None;
    let mut has_component_section = false;

    for payload in Parser::new(0).parse_all(bytes) {
        match payload? {
            Payload::Version { encoding: enc, .. } => {
                encoding.get_or_insert(enc);
            }
            Payload::CustomSection(reader) if reader.name() == "component" => {
                has_component_section = true;
            }
            _ => {}
        }
    }

    match encoding {
        None => Err(WasmError::InvalidWasmBinary("missing version header".to_string())),
        Some(Encoding::Component) => Ok(BinaryKind::Component),
        Some(Encoding::Module) if has_component_section => Err(WasmError::UnsupportedEncoding(
            WASM_UNSUPPORTED_ENCODING.to_string(),
        )),
        Some(Encoding::Module) => Ok(BinaryKind::CoreModule),
    }
}
