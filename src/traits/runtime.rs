// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::Path;

use serde_json::Value;

use crate::errors::WritResult;
use crate::marshal::NativeValue;
use crate::schema::FunctionSignature;

/// The engine that loads and calls WebAssembly binaries.
///
/// The orchestrator only sequences these verbs; it never touches engine
/// types directly, which keeps it testable with an in-memory fake.
pub trait Runtime {
    type Module;

    /// Read and compile the binary at `path`.
    fn load(&self, path: &Path) -> WritResult<Self::Module>;

    /// Call a typed export with already-marshaled arguments.
    ///
    /// Returns `None` for functions declared without a result.
    fn invoke(
        &self,
        module: &Self::Module,
        signature: &FunctionSignature,
        args: &[NativeValue],
    ) -> WritResult<Option<NativeValue>>;

    /// Call an export without an interface description and return the text
    /// it produced.
    fn run_captured(&self, module: &Self::Module, function: &str, args: &[Value])
        -> WritResult<String>;
}
