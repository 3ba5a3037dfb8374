// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Binding cache management.
//!
//! Generated bindings are expensive to produce, so they are kept in a cache
//! directory keyed by the interface file's stem and regenerated only when the
//! interface source changes. The generator itself is an external tool found by
//! the [`ToolLocator`].

mod cache;
mod generator;
mod locator;

use std::fmt;

pub use cache::{BindingCache, BindingPaths};
pub use generator::{BindingGenerator, CommandGenerator, DEFAULT_ARTIFACT, DEFAULT_TARGET};
pub use locator::{ToolLocator, DEFAULT_GENERATOR_PROGRAM};

/// Which side of an interface a binding artifact serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Export,
    Import,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Export, Direction::Import];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Export => "export",
            Direction::Import => "import",
        }
    }

    /// Generator flag selecting this direction.
    pub fn flag(self) -> &'static str {
        match self {
            Direction::Export => "--export",
            Direction::Import => "--import",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
