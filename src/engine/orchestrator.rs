// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Invocation orchestration.
//!
//! One invocation runs these steps in order, stopping at the first error:
//!
//! 1. refresh cached bindings for the interface file (typed path only)
//! 2. resolve the target signature from the cached interface copy
//! 3. marshal the JSON arguments against the declared parameters
//! 4. call the function through the [`Runtime`]
//! 5. marshal the result back to JSON
//!
//! Without an interface file the function is called through the plain path
//! and its printed output is the result.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::bindings::BindingCache;
use crate::errors::{WritError, WritResult};
use crate::marshal::{to_json, to_native_args};
use crate::observability::messages::invocation::{InvocationPrepared, SignatureResolved};
use crate::schema::{FunctionSignature, SchemaTable};
use crate::traits::Runtime;

/// What to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    pub wasm_file: PathBuf,
    pub function: String,
    /// Interface description of the module. `None` selects the plain path.
    pub interface: Option<PathBuf>,
}

/// How a prepared invocation reaches its function.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Typed(FunctionSignature),
    Plain(String),
}

/// A loaded module and resolved target, reusable across calls.
pub struct PreparedInvocation<M> {
    pub module: M,
    pub target: Target,
}

/// Result of one call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Json(Value),
    /// Output of the plain path, exactly as the module printed it.
    Text(String),
}

impl Outcome {
    /// Text written to stdout for this outcome.
    pub fn render(&self) -> WritResult<String> {
        match self {
            Outcome::Json(value) => serde_json::to_string(value)
                .map_err(|e| WritError::SerializationFailure(e.to_string())),
            Outcome::Text(text) => Ok(text.trim_end().to_string()),
        }
    }

    /// JSON view used for comparisons. Text that is not JSON becomes a string.
    pub fn to_value(&self) -> Value {
        match self {
            Outcome::Json(value) => value.clone(),
            Outcome::Text(text) => {
                let trimmed = text.trim();
                serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
            }
        }
    }
}

pub struct Orchestrator<R: Runtime> {
    runtime: R,
    cache: BindingCache,
}

impl<R: Runtime> Orchestrator<R> {
    pub fn new(runtime: R, cache: BindingCache) -> Self {
        Self { runtime, cache }
    }

    /// Refresh bindings, resolve the target and load the module.
    pub fn prepare(&self, request: &InvocationRequest) -> WritResult<PreparedInvocation<R::Module>> {
        if !request.wasm_file.is_file() {
            return Err(WritError::PathNotFound(request.wasm_file.clone()));
        }

        let target = match &request.interface {
            Some(interface) => Target::Typed(self.resolve_signature(interface, &request.function)?),
            None => Target::Plain(request.function.clone()),
        };

        let module = self.runtime.load(&request.wasm_file)?;
        tracing::info!(
            "{}",
            InvocationPrepared {
                module_path: &request.wasm_file,
                function: &request.function,
                typed: matches!(target, Target::Typed(_)),
            }
        );
        Ok(PreparedInvocation { module, target })
    }

    /// Call a prepared invocation with one set of JSON arguments.
    pub fn call(&self, prepared: &PreparedInvocation<R::Module>, args: &[Value]) -> WritResult<Outcome> {
        match &prepared.target {
            Target::Typed(signature) => {
                let native = to_native_args(args, &signature.params)?;
                let result = self.runtime.invoke(&prepared.module, signature, &native)?;
                let json = match result {
                    Some(value) => to_json(&value)?,
                    None => Value::Null,
                };
                Ok(Outcome::Json(json))
            }
            Target::Plain(function) => self
                .runtime
                .run_captured(&prepared.module, function, args)
                .map(Outcome::Text),
        }
    }

    pub fn run(&self, request: &InvocationRequest, args: &[Value]) -> WritResult<Outcome> {
        let prepared = self.prepare(request)?;
        self.call(&prepared, args)
    }

    fn resolve_signature(&self, interface: &Path, function: &str) -> WritResult<FunctionSignature> {
        let paths = self.cache.ensure_bindings(interface)?;
        let cached = fs::read_to_string(&paths.source).map_err(|e| WritError::InterfaceParse {
            path: paths.source.clone(),
            reason: e.to_string(),
        })?;
        let table = SchemaTable::parse(interface, &cached)?;

        let name = interface
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| WritError::PathNotFound(interface.to_path_buf()))?;
        let signature = table.interface(name)?.function(function)?.clone();

        tracing::debug!(
            "{}",
            SignatureResolved {
                interface: name,
                function: &signature.name,
                param_count: signature.params.len(),
                has_result: signature.result.is_some(),
            }
        );
        Ok(signature)
    }
}

/// Parse command-line arguments as JSON, reporting the failing index.
pub fn parse_json_args<S: AsRef<str>>(raw: &[S]) -> WritResult<Vec<Value>> {
    raw.iter()
        .enumerate()
        .map(|(index, arg)| {
            serde_json::from_str(arg.as_ref())
                .map_err(|source| WritError::JsonParseFailure { index, source })
        })
        .collect()
}
