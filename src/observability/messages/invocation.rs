// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for invocation lifecycle events.

use std::fmt::{Display, Formatter};
use std::path::Path;

/// Target function resolved from an interface description.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use writ::observability::messages::invocation::SignatureResolved;
///
/// let msg = SignatureResolved {
///     interface: "record",
///     function: "construct-bar",
///     param_count: 2,
///     has_result: true,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct SignatureResolved<'a> {
    pub interface: &'a str,
    pub function: &'a str,
    pub param_count: usize,
    pub has_result: bool,
}

impl Display for SignatureResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved {}.{} ({} parameter(s), {})",
            self.interface,
            self.function,
            self.param_count,
            if self.has_result { "with result" } else { "no result" }
        )
    }
}

/// Invocation ready to be called.
///
/// # Log Level
/// `info!` - Important operational event
pub struct InvocationPrepared<'a> {
    pub module_path: &'a Path,
    pub function: &'a str,
    pub typed: bool,
}

impl Display for InvocationPrepared<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Prepared {} call to '{}' in {}",
            if self.typed { "typed" } else { "plain" },
            self.function,
            self.module_path.display()
        )
    }
}

/// One batch row failed; the batch continues.
///
/// # Log Level
/// `warn!` - Recoverable problem
///
/// # Example
/// ```
/// use writ::observability::messages::invocation::BatchRowFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "trap");
/// let msg = BatchRowFailed { row: 3, error: &error };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct BatchRowFailed<'a> {
    pub row: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for BatchRowFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Batch row {} failed: {}", self.row, self.error)
    }
}

/// Batch finished.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BatchCompleted {
    pub total: usize,
    pub failed: usize,
}

impl Display for BatchCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Batch completed: {} row(s), {} failed",
            self.total, self.failed
        )
    }
}

/// Settings resolved at startup.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct SettingsResolved<'a> {
    pub cache_dir: &'a Path,
    pub config_file: Option<&'a Path>,
}

impl Display for SettingsResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self.config_file {
            Some(file) => write!(
                f,
                "Using cache {} (config {})",
                self.cache_dir.display(),
                file.display()
            ),
            None => write!(f, "Using cache {}", self.cache_dir.display()),
        }
    }
}
