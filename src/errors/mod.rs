// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod invocation;

pub use invocation::{
    ObjectKind, WritError, WritResult, EXIT_EXPECTATION_MISMATCH, EXIT_FAILURE,
    EXIT_SUCCESS,
};
