//! Config types for backtail.
//!
//! Defines structures for parsing and representing configuration files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tail::DEFAULT_WINDOW_SIZE;

pub const DEFAULT_LOG_ROOT: &str = "/var/log";
pub const DEFAULT_LINES: usize = 100;
pub const DEFAULT_MAX_LINES: usize = 10_000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Field names accepted in a config file, used for typo suggestions.
pub const KNOWN_FIELDS: &[&str] = &[
    "log_root",
    "window_size",
    "default_lines",
    "max_lines",
    "default_file",
    "host",
    "port",
];

/// Raw config file structure (used for parsing).
///
/// Every field is optional so a global and a project file can be layered.
/// Unknown fields are rejected with an error.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Directory that HTTP `filename` parameters resolve against.
    pub log_root: Option<PathBuf>,
    /// Bytes per backward read; also the longest accepted line.
    pub window_size: Option<usize>,
    pub default_lines: Option<usize>,
    pub max_lines: Option<usize>,
    /// File served when a request names none.
    pub default_file: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl RawConfig {
    /// Fill unset fields from `lower`.
    pub fn layered_over(self, lower: RawConfig) -> RawConfig {
        RawConfig {
            log_root: self.log_root.or(lower.log_root),
            window_size: self.window_size.or(lower.window_size),
            default_lines: self.default_lines.or(lower.default_lines),
            max_lines: self.max_lines.or(lower.max_lines),
            default_file: self.default_file.or(lower.default_file),
            host: self.host.or(lower.host),
            port: self.port.or(lower.port),
        }
    }
}

/// Effective configuration with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub log_root: PathBuf,
    pub window_size: usize,
    pub default_lines: usize,
    pub max_lines: usize,
    pub default_file: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_root: PathBuf::from(DEFAULT_LOG_ROOT),
            window_size: DEFAULT_WINDOW_SIZE,
            default_lines: DEFAULT_LINES,
            max_lines: DEFAULT_MAX_LINES,
            default_file: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// `host:port` for binding the HTTP server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
