// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for diagnostic and operational logging.
//!
//! Each message is a small struct implementing `Display`, so log text lives
//! in one place instead of being scattered through format strings.
//!
//! * `cache` - binding cache and generator events
//! * `invocation` - preparation, batch and settings events
//! * `wasm` - binary loading and execution events
//!
//! ```rust
//! use writ::observability::messages::invocation::BatchCompleted;
//!
//! let msg = BatchCompleted { total: 5, failed: 1 };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod cache;
pub mod invocation;
pub mod wasm;
