//! Configuration loading and discovery for `spritestack.toml`
//!
//! Provides functions to find, load, and merge configuration.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::schema::SpritestackConfig;

/// File name looked up when no explicit config path is given.
pub const CONFIG_FILE_NAME: &str = "spritestack.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse spritestack.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override export name
    pub name: Option<String>,
    /// Override canvas size
    pub size: Option<(u32, u32)>,
    /// Override pretty printing
    pub pretty: Option<bool>,
    /// Override Godot resource path
    pub resource_path: Option<String>,
    /// Override placement grid step
    pub grid_step: Option<u32>,
}

/// Find spritestack.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find spritestack.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a spritestack.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// default configuration.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use spritestack::config::load_config;
///
/// let discovered = load_config(None)?;
/// let explicit = load_config(Some(Path::new("characters/spritestack.toml")))?;
/// # Ok::<(), spritestack::config::ConfigError>(())
/// ```
pub fn load_config(path: Option<&Path>) -> Result<SpritestackConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SpritestackConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SpritestackConfig = toml::from_str(&contents)?;
    validate(&config)?;
    Ok(config)
}

/// Turn validation findings into a `ConfigError`.
pub fn validate(config: &SpritestackConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Configuration used when no spritestack.toml is found.
pub fn default_config() -> SpritestackConfig {
    SpritestackConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. Callers should
/// run [`validate`] again afterwards.
pub fn merge_cli_overrides(config: &mut SpritestackConfig, overrides: &CliOverrides) {
    if let Some(ref name) = overrides.name {
        config.export.name = name.clone();
    }

    if let Some((width, height)) = overrides.size {
        config.export.width = width;
        config.export.height = height;
    }

    if let Some(pretty) = overrides.pretty {
        config.export.pretty = pretty;
    }

    if let Some(ref resource_path) = overrides.resource_path {
        config.export.resource_path = resource_path.clone();
    }

    if let Some(grid_step) = overrides.grid_step {
        config.placement.grid_step = grid_step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(content.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[export]\nname = \"test\"");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");
        let subdir = temp.path().join("a").join("b");
        fs::create_dir_all(&subdir).expect("should create subdirs");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_ignores_directory_named_like_config() {
        let temp = TempDir::new().expect("should create temp dir");
        fs::create_dir(temp.path().join(CONFIG_FILE_NAME)).expect("should create dir");

        // The walk may still find a real file higher up; it must not return the directory
        let found = find_config_from(temp.path().to_path_buf());
        assert_ne!(found, Some(temp.path().join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[export]\nname = \"knight\"\nwidth = 32\n");

        let config = load_config(Some(&path)).expect("should load config");
        assert_eq!(config.export.name, "knight");
        assert_eq!(config.export.width, 32);
        assert_eq!(config.export.height, 64);
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[export\nname = ");

        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[export]\nname = \"\"\nwidth = 0\n");

        let err = load_config(Some(&path)).expect_err("should fail validation");
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            name: Some("mage".to_string()),
            size: Some((128, 96)),
            pretty: Some(false),
            resource_path: Some("res://mages".to_string()),
            grid_step: Some(8),
        };

        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.export.name, "mage");
        assert_eq!((config.export.width, config.export.height), (128, 96));
        assert!(!config.export.pretty);
        assert_eq!(config.export.resource_path, "res://mages");
        assert_eq!(config.placement.grid_step, 8);
    }

    #[test]
    fn test_merge_cli_overrides_keeps_unset_fields() {
        let mut config = default_config();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config, default_config());
    }

    #[test]
    fn test_merge_then_validate_rejects_zero_size() {
        let mut config = default_config();
        let overrides = CliOverrides { size: Some((0, 10)), ..Default::default() };
        merge_cli_overrides(&mut config, &overrides);
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }
}
