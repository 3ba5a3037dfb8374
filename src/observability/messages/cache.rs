// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for binding cache and generator events.

use std::fmt::{Display, Formatter};
use std::path::Path;

/// Cached bindings are up to date.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use std::path::Path;
/// use writ::observability::messages::cache::CacheHit;
///
/// let msg = CacheHit {
///     source: Path::new("record.wit"),
///     cache_dir: Path::new("/tmp/writ-bind-cache-dev"),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct CacheHit<'a> {
    pub source: &'a Path,
    pub cache_dir: &'a Path,
}

impl Display for CacheHit<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Bindings for {} are current in {}",
            self.source.display(),
            self.cache_dir.display()
        )
    }
}

/// Cached bindings must be regenerated.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use std::path::Path;
/// use writ::observability::messages::cache::CacheStale;
///
/// let msg = CacheStale {
///     source: Path::new("record.wit"),
///     reason: "interface source changed",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct CacheStale<'a> {
    pub source: &'a Path,
    pub reason: &'a str,
}

impl Display for CacheStale<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Regenerating bindings for {}: {}",
            self.source.display(),
            self.reason
        )
    }
}

/// Regenerated bindings installed in the cache.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BindingsInstalled<'a> {
    pub source: &'a Path,
    pub cache_dir: &'a Path,
}

impl Display for BindingsInstalled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Installed bindings for {} in {}",
            self.source.display(),
            self.cache_dir.display()
        )
    }
}

/// Binding generator located.
///
/// # Log Level
/// `debug!` - Diagnostic detail
///
/// # Example
/// ```
/// use std::path::Path;
/// use writ::observability::messages::cache::ToolResolved;
///
/// let msg = ToolResolved {
///     program: "wit-bindgen",
///     path: Path::new("/usr/local/bin/wit-bindgen"),
///     explicit: false,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ToolResolved<'a> {
    pub program: &'a str,
    pub path: &'a Path,
    pub explicit: bool,
}

impl Display for ToolResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let origin = if self.explicit { "override" } else { "PATH" };
        write!(
            f,
            "Using {} at {} (from {})",
            self.program,
            self.path.display(),
            origin
        )
    }
}

/// Binding generator subprocess started.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct GeneratorInvoked<'a> {
    pub program: &'a Path,
    pub target: &'a str,
    pub direction: &'a str,
    pub source: &'a Path,
}

impl Display for GeneratorInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Running {} {} --{} {}",
            self.program.display(),
            self.target,
            self.direction,
            self.source.display()
        )
    }
}
