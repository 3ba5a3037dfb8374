// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};

use serde_json::Value;
use wasmtime::component::Component;
use wasmtime::{Engine, Module};

use crate::backends::wasm::detector::{detect_binary_kind, BinaryKind};
use crate::backends::wasm::engine::create_engine;
use crate::backends::wasm::error::WasmError;
use crate::backends::wasm::executors::{ComponentExecutor, ModuleExecutor};
use crate::backends::wasm::loader::load_wasm_bytes;
use crate::errors::{WritError, WritResult};
use crate::marshal::NativeValue;
use crate::observability::messages::wasm::{BinaryKindDetected, FunctionInvoked};
use crate::schema::FunctionSignature;
use crate::traits::Runtime;

/// A compiled binary together with the engine it was compiled for.
pub struct LoadedModule {
    pub path: PathBuf,
    pub engine: Engine,
    pub artifact: WasmArtifact,
}

pub enum WasmArtifact {
    Component(Component),
    Module(Module),
}

impl LoadedModule {
    pub fn kind(&self) -> BinaryKind {
        match self.artifact {
            WasmArtifact::Component(_) => BinaryKind::Component,
            WasmArtifact::Module(_) => BinaryKind::CoreModule,
        }
    }
}

/// [`Runtime`] backed by wasmtime.
#[derive(Debug, Clone, Default)]
pub struct WasmtimeRuntime {
    debug_info: bool,
}

impl WasmtimeRuntime {
    pub fn new(debug_info: bool) -> Self {
        Self { debug_info }
    }
}

impl Runtime for WasmtimeRuntime {
    type Module = LoadedModule;

    fn load(&self, path: &Path) -> WritResult<LoadedModule> {
        let module_error = |source: WasmError| WritError::ModuleLoad {
            path: path.to_path_buf(),
            source,
        };

        let bytes = load_wasm_bytes(path).map_err(module_error)?;
        let kind = detect_binary_kind(&bytes).map_err(module_error)?;
        tracing::debug!(
            "{}",
            BinaryKindDetected {
                module_path: path,
                kind,
            }
        );

        let engine = create_engine(kind, self.debug_info).map_err(module_error)?;
        let compile = |e: anyhow::Error| module_error(WasmError::ModuleError(format!("{e:#}")));
        let artifact = match kind {
            BinaryKind::Component => {
                WasmArtifact::Component(Component::new(&engine, &bytes).map_err(compile)?)
            }
            BinaryKind::CoreModule => {
                WasmArtifact::Module(Module::new(&engine, &bytes).map_err(compile)?)
            }
        };

        Ok(LoadedModule {
            path: path.to_path_buf(),
            engine,
            artifact,
        })
    }

    fn invoke(
        &self,
        module: &LoadedModule,
        signature: &FunctionSignature,
        args: &[NativeValue],
    ) -> WritResult<Option<NativeValue>> {
        tracing::debug!(
            "{}",
            FunctionInvoked {
                function: &signature.name,
                kind: module.kind(),
                arg_count: args.len(),
            }
        );
        match &module.artifact {
            WasmArtifact::Component(component) => {
                ComponentExecutor::new(&module.engine, component).execute(signature, args)
            }
            WasmArtifact::Module(_) => Err(WritError::invocation(
                &signature.name,
                format!(
                    "{} is a core module; typed calls need a component (omit --wit to call it directly)",
                    module.path.display()
                ),
            )),
        }
    }

    fn run_captured(&self, module: &LoadedModule, function: &str, args: &[Value]) -> WritResult<String> {
        tracing::debug!(
            "{}",
            FunctionInvoked {
                function,
                kind: module.kind(),
                arg_count: args.len(),
            }
        );
        match &module.artifact {
            WasmArtifact::Module(core) => ModuleExecutor::new(&module.engine, core).execute(function, args),
            WasmArtifact::Component(_) => Err(WritError::invocation(
                function,
                format!(
                    "{} is a component; pass its interface description with --wit",
                    module.path.display()
                ),
            )),
        }
    }
}
