// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::cell::OnceCell;
use std::env;
use std::path::{Path, PathBuf};

use crate::errors::{WritError, WritResult};
use crate::observability::messages::cache::ToolResolved;

/// Default executable name searched on `PATH`.
pub const DEFAULT_GENERATOR_PROGRAM: &str = "wit-bindgen";

/// Finds the binding generator executable.
///
/// Resolution happens on first use and is remembered for the rest of the
/// process, so a run that never regenerates bindings never touches `PATH`.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    explicit: Option<PathBuf>,
    program: String,
    resolved: OnceCell<PathBuf>,
}

impl ToolLocator {
    /// `explicit` is the already-merged override from flag, environment or
    /// config file. Without it, `program` is searched on `PATH`.
    pub fn new(explicit: Option<PathBuf>, program: impl Into<String>) -> Self {
        Self {
            explicit,
            program: program.into(),
            resolved: OnceCell::new(),
        }
    }

    pub fn resolve(&self) -> WritResult<PathBuf> {
        if let Some(path) = self.resolved.get() {
            return Ok(path.clone());
        }
        let path = self.locate()?;
        tracing::debug!(
            "{}",
            ToolResolved {
                program: &self.program,
                path: &path,
                explicit: self.explicit.is_some(),
            }
        );
        let _ = self.resolved.set(path.clone());
        Ok(path)
    }

    fn locate(&self) -> WritResult<PathBuf> {
        let candidate = match &self.explicit {
            Some(path) if path.exists() => path.clone(),
            Some(path) => return Err(WritError::ToolNotFound(path.display().to_string())),
            None => search_path(&self.program)
                .ok_or_else(|| WritError::ToolNotFound(self.program.clone()))?,
        };
        if !is_executable(&candidate) {
            return Err(WritError::ToolNotExecutable(candidate));
        }
        Ok(candidate)
    }
}

impl Default for ToolLocator {
    fn default() -> Self {
        Self::new(None, DEFAULT_GENERATOR_PROGRAM)
    }
}

fn search_path(program: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
