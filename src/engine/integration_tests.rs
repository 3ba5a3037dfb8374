// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end invocations through the wasmtime runtime.
//!
//! The binding generator is replaced by a stand-in; everything after binding
//! generation runs for real.

use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use serde_json::json;
use tempfile::TempDir;

use crate::backends::wasm::WasmtimeRuntime;
use crate::bindings::BindingCache;
use crate::engine::orchestrator::tests::TouchGenerator;
use crate::engine::{check_expectation, parse_expected, InvocationRequest, Orchestrator, Outcome};
use crate::errors::WritError;

const ADDER_WIT: &str = r#"
package writ:tests;

world adder {
    export add: func(a: s32, b: s32) -> s32;
    export clamp-byte: func(v: u8) -> u8;
}
"#;

const ADDER_COMPONENT: &str = r#"
    (component
      (core module $m
        (func (export "add") (param i32 i32) (result i32)
          local.get 0
          local.get 1
          i32.add)
        (func (export "id") (param i32) (result i32)
          local.get 0))
      (core instance $i (instantiate $m))
      (func (export "add") (param "a" s32) (param "b" s32) (result s32)
        (canon lift (core func $i "add")))
      (func (export "clamp-byte") (param "v" u8) (result u8)
        (canon lift (core func $i "id"))))
"#;

const RECORDS_WIT: &str = r#"
package writ:tests;

world records {
    record bar {
        name: string,
        age: u32,
    }

    record wrapper {
        label: string,
        inner: bar,
    }

    export construct-bar: func(name: string, age: u32) -> bar;
    export echo-wrapper: func(w: wrapper) -> wrapper;
    export sum: func(xs: list<s32>) -> s32;
    export checksum: func(data: list<u8>) -> u32;
}
"#;

/// Bump allocator for lowered arguments; records come back through a fixed
/// return area at offset 16.
const RECORDS_COMPONENT: &str = r#"
    (component
      (core module $m
        (memory (export "mem") 1)
        (global $bump (mut i32) (i32.const 1024))
        (func (export "realloc") (param i32 i32 i32 i32) (result i32)
          (local $ptr i32)
          global.get $bump
          local.get 2
          i32.const 1
          i32.sub
          i32.add
          local.get 2
          i32.const 1
          i32.sub
          i32.const -1
          i32.xor
          i32.and
          local.tee $ptr
          local.get 3
          i32.add
          global.set $bump
          local.get $ptr)
        (func (export "construct-bar") (param i32 i32 i32) (result i32)
          i32.const 16
          local.get 0
          i32.store
          i32.const 20
          local.get 1
          i32.store
          i32.const 24
          local.get 2
          i32.store
          i32.const 16)
        (func (export "echo-wrapper") (param i32 i32 i32 i32 i32) (result i32)
          i32.const 16
          local.get 0
          i32.store
          i32.const 20
          local.get 1
          i32.store
          i32.const 24
          local.get 2
          i32.store
          i32.const 28
          local.get 3
          i32.store
          i32.const 32
          local.get 4
          i32.store
          i32.const 16)
        (func (export "sum") (param $ptr i32) (param $len i32) (result i32)
          (local $acc i32)
          block $done
            loop $next
              local.get $len
              i32.eqz
              br_if $done
              local.get $acc
              local.get $ptr
              i32.load
              i32.add
              local.set $acc
              local.get $ptr
              i32.const 4
              i32.add
              local.set $ptr
              local.get $len
              i32.const 1
              i32.sub
              local.set $len
              br $next
            end
          end
          local.get $acc)
        (func (export "checksum") (param $ptr i32) (param $len i32) (result i32)
          (local $acc i32)
          block $done
            loop $next
              local.get $len
              i32.eqz
              br_if $done
              local.get $acc
              local.get $ptr
              i32.load8_u
              i32.add
              local.set $acc
              local.get $ptr
              i32.const 1
              i32.add
              local.set $ptr
              local.get $len
              i32.const 1
              i32.sub
              local.set $len
              br $next
            end
          end
          local.get $acc))
      (core instance $i (instantiate $m))
      (type $bar-def (record (field "name" string) (field "age" u32)))
      (export $bar "bar" (type $bar-def))
      (type $wrapper-def (record (field "label" string) (field "inner" $bar)))
      (export $wrapper "wrapper" (type $wrapper-def))
      (func (export "construct-bar") (param "name" string) (param "age" u32) (result $bar)
        (canon lift (core func $i "construct-bar")
          (memory (core memory $i "mem")) (realloc (core func $i "realloc"))))
      (func (export "echo-wrapper") (param "w" $wrapper) (result $wrapper)
        (canon lift (core func $i "echo-wrapper")
          (memory (core memory $i "mem")) (realloc (core func $i "realloc"))))
      (func (export "sum") (param "xs" (list s32)) (result s32)
        (canon lift (core func $i "sum")
          (memory (core memory $i "mem")) (realloc (core func $i "realloc"))))
      (func (export "checksum") (param "data" (list u8)) (result u32)
        (canon lift (core func $i "checksum")
          (memory (core memory $i "mem")) (realloc (core func $i "realloc")))))
"#;

const POWER_MODULE: &str = r#"
    (module
      (func (export "power_of") (param $base i32) (param $exp i32) (result i32)
        (local $acc i32)
        i32.const 1
        local.set $acc
        block $done
          loop $next
            local.get $exp
            i32.eqz
            br_if $done
            local.get $acc
            local.get $base
            i32.mul
            local.set $acc
            local.get $exp
            i32.const 1
            i32.sub
            local.set $exp
            br $next
          end
        end
        local.get $acc))
"#;

struct Workspace {
    dir: TempDir,
    orchestrator: Orchestrator<WasmtimeRuntime>,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("adder.wit"), ADDER_WIT).unwrap();
        fs::write(dir.path().join("adder.wasm"), wat::parse_str(ADDER_COMPONENT).unwrap()).unwrap();
        fs::write(dir.path().join("power.wasm"), wat::parse_str(POWER_MODULE).unwrap()).unwrap();
        fs::write(dir.path().join("records.wit"), RECORDS_WIT).unwrap();
        fs::write(dir.path().join("records.wasm"), wat::parse_str(RECORDS_COMPONENT).unwrap()).unwrap();

        let generator = TouchGenerator {
            calls: Rc::new(Cell::new(0)),
        };
        let cache = BindingCache::new(dir.path().join("cache"), Box::new(generator)).unwrap();
        Self {
            dir,
            orchestrator: Orchestrator::new(WasmtimeRuntime::default(), cache),
        }
    }

    fn typed(&self, function: &str) -> InvocationRequest {
        InvocationRequest {
            wasm_file: self.dir.path().join("adder.wasm"),
            function: function.to_string(),
            interface: Some(self.dir.path().join("adder.wit")),
        }
    }

    fn records(&self, function: &str) -> InvocationRequest {
        InvocationRequest {
            wasm_file: self.dir.path().join("records.wasm"),
            function: function.to_string(),
            interface: Some(self.dir.path().join("records.wit")),
        }
    }

    fn plain(&self, function: &str) -> InvocationRequest {
        InvocationRequest {
            wasm_file: self.dir.path().join("power.wasm"),
            function: function.to_string(),
            interface: None,
        }
    }
}

#[test]
fn test_typed_call_through_component() {
    let workspace = Workspace::new();
    let outcome = workspace
        .orchestrator
        .run(&workspace.typed("add"), &[json!(40), json!(2)])
        .unwrap();
    assert_eq!(outcome, Outcome::Json(json!(42)));
    assert!(check_expectation(&outcome, &parse_expected("42")).is_ok());
}

#[test]
fn test_declared_width_is_enforced_before_the_call() {
    let workspace = Workspace::new();
    let outcome = workspace
        .orchestrator
        .run(&workspace.typed("clamp_byte"), &[json!(255)])
        .unwrap();
    assert_eq!(outcome.render().unwrap(), "255");

    assert!(matches!(
        workspace
            .orchestrator
            .run(&workspace.typed("clamp-byte"), &[json!(256)]),
        Err(WritError::TypeMismatch { .. })
    ));
}

#[test]
fn test_plain_call_through_core_module() {
    let workspace = Workspace::new();
    let outcome = workspace
        .orchestrator
        .run(&workspace.plain("power-of"), &[json!(2), json!(10)])
        .unwrap();
    assert_eq!(outcome.render().unwrap(), "1024");

    let err = check_expectation(&outcome, &parse_expected("1000")).unwrap_err();
    assert!(matches!(err, WritError::ExpectationMismatch { .. }));
}

#[test]
fn test_typed_call_against_core_module_fails() {
    let workspace = Workspace::new();
    let request = InvocationRequest {
        wasm_file: workspace.dir.path().join("power.wasm"),
        ..workspace.typed("add")
    };
    assert!(matches!(
        workspace.orchestrator.run(&request, &[json!(1), json!(2)]),
        Err(WritError::InvocationFailure { .. })
    ));
}

#[test]
fn test_record_with_string_field_is_returned() {
    let workspace = Workspace::new();
    let outcome = workspace
        .orchestrator
        .run(&workspace.records("construct-bar"), &[json!("meow"), json!(22)])
        .unwrap();
    assert_eq!(outcome.render().unwrap(), r#"{"name":"meow","age":22}"#);
}

#[test]
fn test_nested_record_round_trip() {
    let workspace = Workspace::new();
    let input = json!({"label": "outer", "inner": {"name": "purr", "age": 3}});
    let outcome = workspace
        .orchestrator
        .run(&workspace.records("echo_wrapper"), &[input.clone()])
        .unwrap();
    assert_eq!(outcome, Outcome::Json(input));
}

#[test]
fn test_lists_and_bytes_are_lowered() {
    let workspace = Workspace::new();
    let prepared = workspace.orchestrator.prepare(&workspace.records("sum")).unwrap();
    assert_eq!(
        workspace.orchestrator.call(&prepared, &[json!([1, 2, 3, 4])]).unwrap(),
        Outcome::Json(json!(10))
    );
    assert_eq!(
        workspace.orchestrator.call(&prepared, &[json!([])]).unwrap(),
        Outcome::Json(json!(0))
    );

    let outcome = workspace
        .orchestrator
        .run(&workspace.records("checksum"), &[json!([104, 105, 255])])
        .unwrap();
    assert_eq!(outcome, Outcome::Json(json!(464)));
}
