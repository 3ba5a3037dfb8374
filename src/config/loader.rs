// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{WritError, WritResult};

/// Optional YAML configuration file.
///
/// Every key may be omitted; values here lose to environment variables and
/// command-line flags.
///
/// # Example
/// ```yaml
/// cache_dir: /var/tmp/writ-cache
/// debug_info: true
/// bindgen:
///   path: /opt/wit-bindgen/bin/wit-bindgen
///   target: wasmtime-py
///   artifact: bindings.py
/// ```
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub cache_dir: Option<PathBuf>,
    pub debug_info: Option<bool>,
    pub bindgen: BindgenConfig,
}

/// Binding generator section of the config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BindgenConfig {
    pub path: Option<PathBuf>,
    pub target: Option<String>,
    pub artifact: Option<String>,
}

/// Load a config file from YAML.
pub fn load_config(path: &Path) -> WritResult<ConfigFile> {
    let content = fs::read_to_string(path)
        .map_err(|e| WritError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_config(&content)
        .map_err(|e| WritError::Config(format!("invalid config {}: {}", path.display(), e)))
}

fn parse_config(content: &str) -> Result<ConfigFile, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_full_config() {
        let yaml = r#"
cache_dir: /var/tmp/writ-cache
debug_info: true
bindgen:
  path: /opt/bin/wit-bindgen
  target: rust
  artifact: bindings.rs
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.cache_dir, Some(PathBuf::from("/var/tmp/writ-cache")));
        assert_eq!(config.debug_info, Some(true));
        assert_eq!(config.bindgen.path, Some(PathBuf::from("/opt/bin/wit-bindgen")));
        assert_eq!(config.bindgen.target.as_deref(), Some("rust"));
        assert_eq!(config.bindgen.artifact.as_deref(), Some("bindings.rs"));
    }

    #[test]
    fn test_partial_and_empty_config() {
        let config = parse_config("debug_info: false\n").unwrap();
        assert_eq!(config.debug_info, Some(false));
        assert_eq!(config.bindgen, BindgenConfig::default());

        assert_eq!(parse_config("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(parse_config("cache: /tmp\n").is_err());
    }

    #[test]
    fn test_load_config_errors() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"debug_info: [not, a, bool]\n").unwrap();
        assert!(matches!(load_config(file.path()), Err(WritError::Config(_))));

        assert!(matches!(
            load_config(Path::new("/nonexistent/writ.yaml")),
            Err(WritError::Config(_))
        ));
    }
}
