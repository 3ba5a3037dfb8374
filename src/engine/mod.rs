// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod batch;
pub mod expect;
pub mod orchestrator;

pub use batch::{batch_rows, load_batch, run_batch};
pub use expect::{check_expectation, parse_expected};
pub use orchestrator::{
    parse_json_args, InvocationRequest, Orchestrator, Outcome, PreparedInvocation, Target,
};

#[cfg(test)]
mod integration_tests;
