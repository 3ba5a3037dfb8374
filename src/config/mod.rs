// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
mod loader;
mod settings;

pub use loader::{load_config, BindgenConfig, ConfigFile};
pub use settings::{Overrides, Settings};
