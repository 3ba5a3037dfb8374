// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::bindings::{BindingGenerator, Direction};
use crate::errors::{WritError, WritResult};
use crate::observability::messages::cache::{BindingsInstalled, CacheHit, CacheStale};

/// Locations of one interface's cache entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingPaths {
    /// Byte-exact copy of the interface source the artifacts were built from,
    /// named `<stem>.wit.cached` so it never coincides with a source file even
    /// when the cache directory holds the sources.
    pub source: PathBuf,
    pub export: PathBuf,
    pub import: PathBuf,
}

impl BindingPaths {
    pub fn artifact(&self, direction: Direction) -> &Path {
        match direction {
            Direction::Export => &self.export,
            Direction::Import => &self.import,
        }
    }
}

/// Cache of generated bindings, one entry per interface file stem.
///
/// An entry is valid only when its source copy matches the current source
/// byte for byte and both artifacts are present. The source copy is always
/// written last, so an interrupted update reads as stale on the next run.
///
/// Nothing in this crate reads the generated artifacts: call signatures come
/// from the source copy. They are still generated and installed so the cache
/// directory is usable by tools that consume the bindings, which means a
/// typed call needs the generator even though it never loads its output.
pub struct BindingCache {
    cache_dir: PathBuf,
    generator: Box<dyn BindingGenerator>,
}

impl BindingCache {
    /// Open the cache rooted at `cache_dir`, creating the directory if needed.
    pub fn new(cache_dir: impl Into<PathBuf>, generator: Box<dyn BindingGenerator>) -> WritResult<Self> {
        let cache_dir = cache_dir.into();
        fs::create_dir_all(&cache_dir).map_err(|e| WritError::cache_io(&cache_dir, e))?;
        Ok(Self {
            cache_dir,
            generator,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache entry locations for the interface file at `source`.
    pub fn paths_for(&self, source: &Path) -> WritResult<BindingPaths> {
        let stem = source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| WritError::PathNotFound(source.to_path_buf()))?;
        let artifact = self.generator.artifact_name();
        Ok(BindingPaths {
            source: self.cache_dir.join(format!("{stem}.wit.cached")),
            export: self.cache_dir.join(format!("{stem}_export_{artifact}")),
            import: self.cache_dir.join(format!("{stem}_import_{artifact}")),
        })
    }

    /// Return up-to-date bindings for `source`, regenerating them if stale.
    pub fn ensure_bindings(&self, source: &Path) -> WritResult<BindingPaths> {
        if !source.is_file() {
            return Err(WritError::PathNotFound(source.to_path_buf()));
        }
        let current = fs::read(source).map_err(|e| WritError::cache_io(source, e))?;
        let paths = self.paths_for(source)?;

        match stale_reason(&current, &paths) {
            None => {
                tracing::debug!(
                    "{}",
                    CacheHit {
                        source,
                        cache_dir: &self.cache_dir,
                    }
                );
            }
            Some(reason) => {
                tracing::info!("{}", CacheStale { source, reason });
                self.regenerate(source, &current, &paths)?;
            }
        }
        Ok(paths)
    }

    fn regenerate(&self, source: &Path, current: &[u8], paths: &BindingPaths) -> WritResult<()> {
        match fs::remove_file(&paths.source) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(WritError::cache_io(&paths.source, e)),
        }

        let staging = tempfile::Builder::new()
            .prefix(".writ-gen-")
            .tempdir_in(&self.cache_dir)
            .map_err(|e| WritError::cache_io(&self.cache_dir, e))?;

        for direction in Direction::ALL {
            let out_dir = staging.path().join(direction.as_str());
            fs::create_dir(&out_dir).map_err(|e| WritError::cache_io(&out_dir, e))?;
            let artifact = self.generator.generate(source, direction, &out_dir)?;
            let target = paths.artifact(direction);
            fs::rename(&artifact, target).map_err(|e| WritError::cache_io(target, e))?;
        }

        let mut copy = NamedTempFile::new_in(&self.cache_dir)
            .map_err(|e| WritError::cache_io(&self.cache_dir, e))?;
        copy.write_all(current)
            .map_err(|e| WritError::cache_io(copy.path(), e))?;
        copy.persist(&paths.source)
            .map_err(|e| WritError::cache_io(&paths.source, e.error))?;

        tracing::info!(
            "{}",
            BindingsInstalled {
                source,
                cache_dir: &self.cache_dir,
            }
        );
        Ok(())
    }
}

fn stale_reason(current: &[u8], paths: &BindingPaths) -> Option<&'static str> {
    match fs::read(&paths.source) {
        Err(_) => return Some("no cached source copy"),
        Ok(cached) if cached != current => return Some("interface source changed"),
        Ok(_) => {}
    }
    if !paths.export.is_file() || !paths.import.is_file() {
        return Some("binding artifact missing");
    }
    None
}
