// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::engine::orchestrator::Outcome;
use crate::errors::{WritError, WritResult};

/// Parse an `--expect` value. Text that is not JSON is taken as a string.
pub fn parse_expected(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Compare an outcome with the expected value as JSON.
pub fn check_expectation(outcome: &Outcome, expected: &Value) -> WritResult<()> {
    let actual = outcome.to_value();
    if &actual == expected {
        Ok(())
    } else {
        Err(WritError::ExpectationMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
