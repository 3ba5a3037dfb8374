// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::bindings::{Direction, ToolLocator};
use crate::errors::{WritError, WritResult};
use crate::observability::messages::cache::GeneratorInvoked;

/// Default generator target language.
pub const DEFAULT_TARGET: &str = "wasmtime-py";
/// Default artifact file name written by the generator.
pub const DEFAULT_ARTIFACT: &str = "bindings.py";

/// Produces one binding artifact for one direction of an interface.
pub trait BindingGenerator {
    /// File name of the artifact inside the output directory.
    fn artifact_name(&self) -> &str;

    /// Generate bindings for `source` into `out_dir` and return the artifact path.
    fn generate(&self, source: &Path, direction: Direction, out_dir: &Path) -> WritResult<PathBuf>;
}

/// Runs the external generator as a subprocess:
/// `<program> <target> --export|--import <source> --out-dir <dir>`.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    locator: ToolLocator,
    target: String,
    artifact: String,
}

impl CommandGenerator {
    pub fn new(locator: ToolLocator, target: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            locator,
            target: target.into(),
            artifact: artifact.into(),
        }
    }

    pub fn with_defaults(locator: ToolLocator) -> Self {
        Self::new(locator, DEFAULT_TARGET, DEFAULT_ARTIFACT)
    }
}

impl BindingGenerator for CommandGenerator {
    fn artifact_name(&self) -> &str {
        &self.artifact
    }

    fn generate(&self, source: &Path, direction: Direction, out_dir: &Path) -> WritResult<PathBuf> {
        let program = self.locator.resolve()?;
        let failure = |reason: String| WritError::CodegenFailure {
            source_path: source.to_path_buf(),
            direction,
            reason,
        };

        tracing::debug!(
            "{}",
            GeneratorInvoked {
                program: &program,
                target: &self.target,
                direction: direction.as_str(),
                source,
            }
        );

        let output = Command::new(&program)
            .arg(&self.target)
            .arg(direction.flag())
            .arg(source)
            .arg("--out-dir")
            .arg(out_dir)
            .output()
            .map_err(|e| failure(format!("failed to spawn {}: {}", program.display(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failure(format!("{}: {}", output.status, stderr.trim())));
        }

        let artifact = out_dir.join(&self.artifact);
        if !artifact.is_file() {
            return Err(failure(format!(
                "generator did not produce {}",
                artifact.display()
            )));
        }
        Ok(artifact)
    }
}
