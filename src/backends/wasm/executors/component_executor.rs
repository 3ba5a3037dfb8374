// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use wasmtime::component::{Component, ComponentExportIndex, Linker, ResourceTable, Val};
use wasmtime::{Engine, Store};
use wasmtime_wasi::{WasiCtx, WasiCtxBuilder, WasiCtxView, WasiView};

use crate::backends::wasm::lower::{lift, lower};
use crate::errors::{ObjectKind, WritError, WritResult};
use crate::marshal::NativeValue;
use crate::schema::FunctionSignature;

/// Calls typed exports of a component with WASI preview 2 linked.
///
/// Imports the component needs beyond WASI are defined as traps, so a
/// reactor that never reaches them can still be exercised.
pub struct ComponentExecutor<'a> {
    engine: &'a Engine,
    component: &'a Component,
}

struct Ctx {
    wasi: WasiCtx,
    table: ResourceTable,
}

impl WasiView for Ctx {
    fn ctx(&mut self) -> WasiCtxView<'_> {
        WasiCtxView {
            ctx: &mut self.wasi,
            table: &mut self.table,
        }
    }
}

impl<'a> ComponentExecutor<'a> {
    pub fn new(engine: &'a Engine, component: &'a Component) -> Self {
        Self { engine, component }
    }

    pub fn execute(
        &self,
        signature: &FunctionSignature,
        args: &[NativeValue],
    ) -> WritResult<Option<NativeValue>> {
        let function = signature.name.as_str();
        let fail = |e: anyhow::Error| WritError::invocation(function, format!("{e:#}"));

        let params = args
            .iter()
            .zip(signature.param_types())
            .map(|(arg, ty)| lower(arg, ty))
            .collect::<Result<Vec<Val>, String>>()
            .map_err(|reason| WritError::invocation(function, reason))?;

        let wasi = WasiCtxBuilder::new()
            .inherit_stdio()
            .args(&["writ", function])
            .build();
        let mut store = Store::new(
            self.engine,
            Ctx {
                wasi,
                table: ResourceTable::new(),
            },
        );

        let mut linker = Linker::<Ctx>::new(self.engine);
        wasmtime_wasi::p2::add_to_linker_sync(&mut linker).map_err(fail)?;
        linker
            .define_unknown_imports_as_traps(self.component)
            .map_err(fail)?;

        let instance = linker
            .instantiate(&mut store, self.component)
            .map_err(fail)?;

        let mut index: Option<ComponentExportIndex> = None;
        for name in &signature.export_path {
            index = Some(
                instance
                    .get_export_index(&mut store, index.as_ref(), name)
                    .ok_or_else(|| WritError::ObjectNotFound {
                        kind: ObjectKind::Export,
                        name: name.clone(),
                    })?,
            );
        }
        let func = index
            .and_then(|index| instance.get_func(&mut store, index))
            .ok_or_else(|| WritError::ObjectNotFound {
                kind: ObjectKind::Function,
                name: signature.export_path.join("/"),
            })?;

        let mut results = vec![Val::Bool(false); usize::from(signature.result.is_some())];
        func.call(&mut store, &params, &mut results).map_err(fail)?;
        func.post_return(&mut store).map_err(fail)?;

        match (results.first(), &signature.result) {
            (Some(value), Some(ty)) => lift(value, Some(ty))
                .map(Some)
                .map_err(|reason| WritError::invocation(function, reason)),
            _ => Ok(None),
        }
    }
}
