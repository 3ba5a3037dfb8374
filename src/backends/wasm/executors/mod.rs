// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution strategies, one per binary kind.
//!
//! ```text
//! Component   → ComponentExecutor (typed exports, WASI preview 2)
//! Core module → ModuleExecutor    (plain path, WASI preview 1, captured stdout)
//! ```
//!
//! Both build a fresh store and linker per call, so no guest state survives
//! from one invocation to the next.

mod component_executor;
mod module_executor;

pub use component_executor::ComponentExecutor;
pub use module_executor::ModuleExecutor;
