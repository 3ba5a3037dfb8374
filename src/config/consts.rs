// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Environment variable overriding the binding cache directory.
pub const ENV_CACHE_DIR: &str = "WRIT_CACHE_DIR";
/// Environment variable overriding the binding generator executable.
pub const ENV_BINDGEN: &str = "WIT_BINDGEN";
/// Environment variable naming a YAML config file.
pub const ENV_CONFIG: &str = "WRIT_CONFIG";
/// Prefix of the default cache directory under the system temp directory.
pub const CACHE_DIR_PREFIX: &str = "writ-bind-cache";
