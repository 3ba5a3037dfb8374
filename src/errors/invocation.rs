// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::backends::wasm::WasmError;
use crate::bindings::Direction;

/// Process exit status for a successful run.
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit status for any failure other than an expectation mismatch.
pub const EXIT_FAILURE: i32 = 1;
/// Process exit status when `--expect` does not match the result.
pub const EXIT_EXPECTATION_MISMATCH: i32 = 2;

/// Kind of object that could not be found in a resolved interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Interface,
    Function,
    Export,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Interface => write!(f, "interface"),
            ObjectKind::Function => write!(f, "function"),
            ObjectKind::Export => write!(f, "export"),
        }
    }
}

/// Every way a single invocation can fail.
///
/// No variant is retried or downgraded: the first error aborts the invocation
/// and is reported once by the command-line boundary.
#[derive(Error, Debug)]
pub enum WritError {
    #[error("file path doesn't exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("missing input: {0}")]
    MissingInput(&'static str),

    #[error("failed to load json argument at index {index}: {source}")]
    JsonParseFailure {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("type mismatch at {position}: {value} is not a valid {expected}")]
    TypeMismatch {
        position: String,
        value: String,
        expected: String,
    },

    #[error("arg type not implemented at {position}: {kind}")]
    ArgTypeNotImplemented { position: String, kind: String },

    #[error("type not implemented: {0}")]
    TypeNotImplemented(String),

    #[error("no object found in target: {kind} {name}")]
    ObjectNotFound { kind: ObjectKind, name: String },

    #[error("missing the following tool in PATH: {0}")]
    ToolNotFound(String),

    #[error("the following path is not executable: {}", .0.display())]
    ToolNotExecutable(PathBuf),

    #[error("binding generation ({direction}) failed for {}: {reason}", .source_path.display())]
    CodegenFailure {
        source_path: PathBuf,
        direction: Direction,
        reason: String,
    },

    #[error("binding cache I/O error at {}: {source}", .path.display())]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid interface description {}: {reason}", .path.display())]
    InterfaceParse { path: PathBuf, reason: String },

    #[error("failed to load module {}: {source}", .path.display())]
    ModuleLoad {
        path: PathBuf,
        #[source]
        source: WasmError,
    },

    #[error("invocation of '{function}' failed: {reason}")]
    InvocationFailure { function: String, reason: String },

    #[error("fail to convert to json string: {0}")]
    SerializationFailure(String),

    #[error("result mismatch: expected {expected}, got {actual}")]
    ExpectationMismatch { expected: String, actual: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl WritError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WritError::ExpectationMismatch { .. } => EXIT_EXPECTATION_MISMATCH,
            _ => EXIT_FAILURE,
        }
    }

    pub(crate) fn cache_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WritError::CacheIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invocation(function: &str, reason: impl fmt::Display) -> Self {
        WritError::InvocationFailure {
            function: function.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used across the crate.
pub type WritResult<T> = Result<T, WritError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let mismatch = WritError::ExpectationMismatch {
            expected: "1".to_string(),
            actual: "2".to_string(),
        };
        assert_eq!(mismatch.exit_code(), EXIT_EXPECTATION_MISMATCH);
        assert_eq!(WritError::MissingInput("function name").exit_code(), EXIT_FAILURE);
        assert_eq!(
            WritError::invocation("power-of", "wasm trap: unreachable").exit_code(),
            EXIT_FAILURE
        );
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = WritError::ObjectNotFound {
            kind: ObjectKind::Function,
            name: "power-of".to_string(),
        };
        assert_eq!(err.to_string(), "no object found in target: function power-of");

        let err = WritError::CodegenFailure {
            source_path: PathBuf::from("record.wit"),
            direction: Direction::Import,
            reason: "exit status 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("record.wit"));
        assert!(msg.contains("import"));
    }

    #[test]
    fn test_json_parse_failure_reports_index() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = WritError::JsonParseFailure { index: 2, source };
        assert!(err.to_string().contains("index 2"));
    }
}
