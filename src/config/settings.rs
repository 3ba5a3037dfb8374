// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resolved settings.
//!
//! Every value is taken from the first source that has it:
//! command-line flag, then environment variable, then config file, then the
//! built-in default. Settings are resolved once at startup and handed to
//! constructors; nothing reads the environment after that.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::bindings::{
    BindingCache, CommandGenerator, ToolLocator, DEFAULT_ARTIFACT, DEFAULT_GENERATOR_PROGRAM,
    DEFAULT_TARGET,
};
use crate::config::consts::{CACHE_DIR_PREFIX, ENV_BINDGEN, ENV_CACHE_DIR, ENV_CONFIG};
use crate::config::loader::{load_config, ConfigFile};
use crate::errors::{WritError, WritResult};

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cache_dir: Option<PathBuf>,
    pub bindgen: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub debug_info: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub cache_dir: PathBuf,
    pub debug_info: bool,
    /// Explicit generator path; `None` means search `PATH`.
    pub bindgen_path: Option<PathBuf>,
    pub bindgen_target: String,
    pub bindgen_artifact: String,
    pub config_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings against the process environment.
    pub fn resolve(overrides: &Overrides) -> WritResult<Self> {
        Self::resolve_with(overrides, |key| env::var_os(key))
    }

    /// Resolve settings with `lookup` standing in for the environment.
    /// Empty variables count as unset.
    pub fn resolve_with<F>(overrides: &Overrides, lookup: F) -> WritResult<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let config_file = overrides
            .config
            .clone()
            .or_else(|| var(ENV_CONFIG).map(PathBuf::from));
        let file = match &config_file {
            Some(path) if !path.is_file() => {
                return Err(WritError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )))
            }
            Some(path) => load_config(path)?,
            None => ConfigFile::default(),
        };

        let cache_dir = overrides
            .cache_dir
            .clone()
            .or_else(|| var(ENV_CACHE_DIR).map(PathBuf::from))
            .or(file.cache_dir)
            .unwrap_or_else(|| default_cache_dir(&var));

        let bindgen_path = overrides
            .bindgen
            .clone()
            .or_else(|| var(ENV_BINDGEN).map(PathBuf::from))
            .or(file.bindgen.path);

        Ok(Self {
            cache_dir,
            debug_info: overrides.debug_info || file.debug_info.unwrap_or(false),
            bindgen_path,
            bindgen_target: file
                .bindgen
                .target
                .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            bindgen_artifact: file
                .bindgen
                .artifact
                .unwrap_or_else(|| DEFAULT_ARTIFACT.to_string()),
            config_file,
        })
    }

    /// Binding cache backed by the external generator these settings describe.
    pub fn binding_cache(&self) -> WritResult<BindingCache> {
        let locator = ToolLocator::new(self.bindgen_path.clone(), DEFAULT_GENERATOR_PROGRAM);
        let generator = CommandGenerator::new(
            locator,
            self.bindgen_target.clone(),
            self.bindgen_artifact.clone(),
        );
        BindingCache::new(self.cache_dir.clone(), Box::new(generator))
    }
}

fn default_cache_dir(var: &dyn Fn(&str) -> Option<OsString>) -> PathBuf {
    let user = var("USER")
        .or_else(|| var("USERNAME"))
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "user".to_string());
    env::temp_dir().join(format!("{CACHE_DIR_PREFIX}-{user}"))
}
