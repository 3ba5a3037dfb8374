// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for WASM loading and execution events.

use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::backends::wasm::BinaryKind;

/// WASM binary read from disk.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use std::path::Path;
/// use writ::observability::messages::wasm::ModuleLoaded;
///
/// let msg = ModuleLoaded {
///     module_path: Path::new("power.wasm"),
///     size_bytes: 4096,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ModuleLoaded<'a> {
    pub module_path: &'a Path,
    pub size_bytes: usize,
}

impl Display for ModuleLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded WASM binary: {} ({} bytes)",
            self.module_path.display(),
            self.size_bytes
        )
    }
}

/// WASM binary could not be read or was rejected.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use std::path::Path;
/// use writ::observability::messages::wasm::ModuleLoadFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
/// let msg = ModuleLoadFailed {
///     module_path: Path::new("missing.wasm"),
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ModuleLoadFailed<'a> {
    pub module_path: &'a Path,
    pub error: &'a dyn std::error::Error,
}

impl Display for ModuleLoadFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to load WASM binary '{}': {}",
            self.module_path.display(),
            self.error
        )
    }
}

/// Binary kind detected.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use std::path::Path;
/// use writ::backends::wasm::BinaryKind;
/// use writ::observability::messages::wasm::BinaryKindDetected;
///
/// let msg = BinaryKindDetected {
///     module_path: Path::new("record.wasm"),
///     kind: BinaryKind::Component,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct BinaryKindDetected<'a> {
    pub module_path: &'a Path,
    pub kind: BinaryKind,
}

impl Display for BinaryKindDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Detected {} in {}", self.kind, self.module_path.display())
    }
}

/// Engine created.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct EngineCreated {
    pub kind: BinaryKind,
    pub debug_info: bool,
}

impl Display for EngineCreated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created engine for {} (debug info: {})",
            self.kind,
            if self.debug_info { "on" } else { "off" }
        )
    }
}

/// Function about to be called.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use writ::backends::wasm::BinaryKind;
/// use writ::observability::messages::wasm::FunctionInvoked;
///
/// let msg = FunctionInvoked {
///     function: "power-of",
///     kind: BinaryKind::CoreModule,
///     arg_count: 2,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct FunctionInvoked<'a> {
    pub function: &'a str,
    pub kind: BinaryKind,
    pub arg_count: usize,
}

impl Display for FunctionInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Invoking '{}' on {} with {} argument(s)",
            self.function, self.kind, self.arg_count
        )
    }
}
