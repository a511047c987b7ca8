//! Config discovery for backtail.
//!
//! Walks parent directories to find `backtail.yaml` and checks for global config
//! at `~/.config/backtail/config.yaml`.

use std::path::{Path, PathBuf};

/// Project config filename to search for in parent directories.
pub const PROJECT_CONFIG_NAME: &str = "backtail.yaml";

/// Global config filename within the backtail config directory.
pub const GLOBAL_CONFIG_NAME: &str = "config.yaml";

const APP_DIR_NAME: &str = "backtail";

/// Paths to the config files that were found.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryResult {
    /// Directory containing `backtail.yaml`.
    pub project_root: Option<PathBuf>,
    pub project_config: Option<PathBuf>,
    pub global_config: Option<PathBuf>,
}

impl DiscoveryResult {
    pub fn has_config(&self) -> bool {
        self.project_config.is_some() || self.global_config.is_some()
    }

    /// The single file config commands operate on: project wins over global.
    pub fn closest(&self) -> Option<&Path> {
        self.project_config
            .as_deref()
            .or(self.global_config.as_deref())
    }
}

/// Location of the global config file, whether or not it exists.
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(GLOBAL_CONFIG_NAME))
}

/// Discover config files starting from the current working directory.
pub fn discover() -> DiscoveryResult {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.canonicalize().unwrap_or(dir),
        Err(_) => {
            return DiscoveryResult {
                global_config: existing_global(),
                ..Default::default()
            }
        }
    };
    discover_from(&cwd).0
}

/// Discover config files walking up from `start`.
///
/// Also returns every directory that was checked, for `-v` output.
pub fn discover_from(start: &Path) -> (DiscoveryResult, Vec<PathBuf>) {
    let mut result = DiscoveryResult {
        global_config: existing_global(),
        ..Default::default()
    };
    let mut searched_paths = Vec::new();

    for ancestor in start.ancestors() {
        searched_paths.push(ancestor.to_path_buf());

        let config_path = ancestor.join(PROJECT_CONFIG_NAME);
        if config_path.is_file() {
            result.project_root = Some(ancestor.to_path_buf());
            result.project_config = Some(config_path);
            break;
        }
    }

    tracing::debug!(
        project = ?result.project_config,
        global = ?result.global_config,
        searched = searched_paths.len(),
        "config discovery"
    );

    (result, searched_paths)
}

fn existing_global() -> Option<PathBuf> {
    global_config_path().filter(|path| path.is_file())
}
