//! Config loading for backtail.
//!
//! Loads YAML config files, layers project over global and validates the result.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::discovery::DiscoveryResult;
use crate::config::error::ConfigError;
use crate::config::types::{Config, RawConfig};

/// Expand tilde in path to home directory.
///
/// Handles the following cases:
/// - `~/foo` -> `/home/user/foo`
/// - `/absolute/path` -> unchanged
/// - `relative/path` -> unchanged
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path_str == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    path.to_path_buf()
}

/// Load and parse a YAML config file.
fn load_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    // A file holding only comments is a valid, empty config
    let has_content = content
        .lines()
        .map(str::trim)
        .any(|l| !l.is_empty() && !l.starts_with('#'));
    if !has_content {
        return Ok(RawConfig::default());
    }

    serde_saphyr::from_str(&content)
        .map_err(|e| ConfigError::from_saphyr_error(path.to_path_buf(), e))
}

/// Apply defaults and check the values that the engine cannot work with.
///
/// `path` is the file blamed in validation errors.
fn resolve(raw: RawConfig, path: &Path) -> Result<Config, ConfigError> {
    let defaults = Config::default();
    let config = Config {
        log_root: raw
            .log_root
            .map(|p| expand_path(&p))
            .unwrap_or(defaults.log_root),
        window_size: raw.window_size.unwrap_or(defaults.window_size),
        default_lines: raw.default_lines.unwrap_or(defaults.default_lines),
        max_lines: raw.max_lines.unwrap_or(defaults.max_lines),
        default_file: raw.default_file,
        host: raw.host.unwrap_or(defaults.host),
        port: raw.port.unwrap_or(defaults.port),
    };

    let invalid = |message: String| ConfigError::Validation {
        path: path.to_path_buf(),
        message,
    };
    if config.window_size == 0 {
        return Err(invalid("`window_size` must be greater than 0".to_string()));
    }
    if config.default_lines == 0 {
        return Err(invalid("`default_lines` must be greater than 0".to_string()));
    }
    if config.max_lines < config.default_lines {
        return Err(invalid(format!(
            "`max_lines` ({}) is smaller than `default_lines` ({})",
            config.max_lines, config.default_lines
        )));
    }
    if config.host.trim().is_empty() {
        return Err(invalid("`host` must not be empty".to_string()));
    }

    Ok(config)
}

/// Load config from a single file (closest-wins semantics for config commands).
pub fn load_single_file(path: &Path) -> Result<Config, ConfigError> {
    resolve(load_file(path)?, path)
}

/// Load config from discovered config files.
///
/// Project values override global ones field by field. Returns the defaults
/// if no config files exist.
pub fn load(discovery: &DiscoveryResult) -> Result<Config, ConfigError> {
    let mut raw = RawConfig::default();
    let mut blame = PathBuf::new();

    if let Some(global_path) = &discovery.global_config {
        raw = load_file(global_path)?.layered_over(raw);
        blame = global_path.clone();
    }

    if let Some(project_path) = &discovery.project_config {
        raw = load_file(project_path)?.layered_over(raw);
        blame = project_path.clone();
    }

    resolve(raw, &blame)
}
