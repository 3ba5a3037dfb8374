// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use wasmtime::{Engine, Linker, Module, Store, Val, ValType};
use wasmtime_wasi::p1::WasiP1Ctx;
use wasmtime_wasi::p2::pipe::MemoryOutputPipe;
use wasmtime_wasi::WasiCtxBuilder;

use crate::errors::{ObjectKind, WritError, WritResult};

/// Upper bound on captured guest stdout.
const STDOUT_CAPACITY: usize = 1024 * 1024;

/// Calls an export of a core module with WASI preview 1 linked and stdout
/// captured in memory.
///
/// The returned text is what a command-line `--invoke` would print: whatever
/// the guest wrote to stdout, then each result on its own line.
pub struct ModuleExecutor<'a> {
    engine: &'a Engine,
    module: &'a Module,
}

impl<'a> ModuleExecutor<'a> {
    pub fn new(engine: &'a Engine, module: &'a Module) -> Self {
        Self { engine, module }
    }

    pub fn execute(&self, function: &str, args: &[Value]) -> WritResult<String> {
        let fail = |e: anyhow::Error| WritError::invocation(function, format!("{e:#}"));

        let stdout = MemoryOutputPipe::new(STDOUT_CAPACITY);
        let wasi = WasiCtxBuilder::new()
            .stdout(stdout.clone())
            .inherit_stderr()
            .args(&["writ", function])
            .build_p1();
        let mut store = Store::new(self.engine, wasi);

        let mut linker: Linker<WasiP1Ctx> = Linker::new(self.engine);
        wasmtime_wasi::p1::add_to_linker_sync(&mut linker, |cx| cx).map_err(fail)?;
        linker.define_unknown_imports_as_traps(self.module).map_err(fail)?;

        let instance = linker.instantiate(&mut store, self.module).map_err(fail)?;

        if let Some(init) = instance.get_func(&mut store, "_initialize") {
            init.call(&mut store, &[], &mut []).map_err(fail)?;
        }

        let func = instance
            .get_func(&mut store, function)
            .or_else(|| instance.get_func(&mut store, &function.replace('-', "_")))
            .ok_or_else(|| WritError::ObjectNotFound {
                kind: ObjectKind::Function,
                name: function.to_string(),
            })?;

        let ty = func.ty(&store);
        if ty.params().len() != args.len() {
            return Err(WritError::TypeMismatch {
                position: "arguments".to_string(),
                value: format!("{} argument(s)", args.len()),
                expected: format!("{} argument(s)", ty.params().len()),
            });
        }
        let params = ty
            .params()
            .zip(args)
            .enumerate()
            .map(|(index, (param, arg))| core_value(&param, arg, index))
            .collect::<WritResult<Vec<_>>>()?;
        let mut results: Vec<Val> = ty.results().map(|_| Val::I32(0)).collect();

        func.call(&mut store, &params, &mut results).map_err(fail)?;
        drop(store);

        let mut text = String::from_utf8_lossy(&stdout.contents()).into_owned();
        for result in &results {
            let line = format_value(result).map_err(|reason| WritError::invocation(function, reason))?;
            text.push_str(&line);
            text.push('\n');
        }
        Ok(text)
    }
}

fn core_value(ty: &ValType, arg: &Value, index: usize) -> WritResult<Val> {
    let mismatch = || WritError::TypeMismatch {
        position: format!("${index}"),
        value: arg.to_string(),
        expected: format!("{ty}"),
    };
    match ty {
        ValType::I32 => arg
            .as_i64()
            .and_then(|n| i32::try_from(n).ok().or_else(|| u32::try_from(n).ok().map(|u| u as i32)))
            .map(Val::I32)
            .ok_or_else(mismatch),
        ValType::I64 => arg
            .as_i64()
            .or_else(|| arg.as_u64().map(|u| u as i64))
            .map(Val::I64)
            .ok_or_else(mismatch),
        ValType::F32 => arg.as_f64().map(|f| Val::from(f as f32)).ok_or_else(mismatch),
        ValType::F64 => arg.as_f64().map(Val::from).ok_or_else(mismatch),
        _ => Err(WritError::ArgTypeNotImplemented {
            position: format!("${index}"),
            kind: format!("{ty}"),
        }),
    }
}

fn format_value(value: &Val) -> Result<String, String> {
    match value {
        Val::I32(n) => Ok(n.to_string()),
        Val::I64(n) => Ok(n.to_string()),
        Val::F32(bits) => Ok(f32::from_bits(*bits).to_string()),
        Val::F64(bits) => Ok(f64::from_bits(*bits).to_string()),
        other => Err(format!("result type not supported: {:?}", other)),
    }
}
