//! Config error types for backtail.
//!
//! Provides rich error messages with file locations and typo suggestions.

use std::fmt;
use std::path::PathBuf;

use strsim::jaro_winkler;

use crate::config::types::KNOWN_FIELDS;

const SIMILARITY_THRESHOLD: f64 = 0.8;

/// Error loading or parsing a config file.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading the config file.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error.
    Parse {
        path: PathBuf,
        message: String,
        line: Option<usize>,
        column: Option<usize>,
        suggestion: Option<String>,
    },

    /// Validation error (semantic errors after parsing).
    Validation { path: PathBuf, message: String },
}

impl ConfigError {
    /// Build a parse error from a serde-saphyr failure.
    ///
    /// Pulls the line/column out of the message when present and, for an
    /// unknown field, suggests the closest known field name.
    pub fn from_saphyr_error(path: PathBuf, err: impl fmt::Display) -> Self {
        let message = err.to_string();
        let line = number_after(&message, "line ");
        let column = number_after(&message, "column ");
        let suggestion = unknown_field(&message).and_then(suggest_field);

        ConfigError::Parse {
            path,
            message: message.lines().next().unwrap_or_default().to_string(),
            line,
            column,
            suggestion,
        }
    }

    /// Format error in Cargo-style format.
    pub fn format_cargo_style(&self) -> String {
        match self {
            ConfigError::Io { path, source } => {
                format!(
                    "error: cannot read config file\n  --> {}\n  |\n  = {}\n",
                    path.display(),
                    source
                )
            }
            ConfigError::Parse {
                path,
                message,
                line,
                column,
                suggestion,
            } => {
                let location = match (line, column) {
                    (Some(l), Some(c)) => format!("{}:{}:{}", path.display(), l, c),
                    (Some(l), None) => format!("{}:{}", path.display(), l),
                    _ => format!("{}", path.display()),
                };
                let mut output = format!("error: {}\n  --> {}\n  |\n", message, location);
                if let Some(suggestion) = suggestion {
                    output.push_str(&format!("  = help: did you mean `{}`?\n", suggestion));
                }
                output
            }
            ConfigError::Validation { path, message } => {
                format!("error: {}\n  --> {}\n  |\n", message, path.display())
            }
        }
    }
}

/// First number following `label` in `message`.
fn number_after(message: &str, label: &str) -> Option<usize> {
    let (_, rest) = message.split_once(label)?;
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Field name from an "unknown field `xyz`" message.
fn unknown_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("unknown field")?;
    let rest = rest.trim_start().strip_prefix('`')?;
    let (field, _) = rest.split_once('`')?;
    Some(field)
}

fn suggest_field(field: &str) -> Option<String> {
    KNOWN_FIELDS
        .iter()
        .filter(|&&known| jaro_winkler(field, known) >= SIMILARITY_THRESHOLD)
        .max_by(|a, b| {
            jaro_winkler(field, a)
                .partial_cmp(&jaro_winkler(field, b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|&s| s.to_string())
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_cargo_style())
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_suggestion() {
        let err = ConfigError::from_saphyr_error(
            PathBuf::from("backtail.yaml"),
            "unknown field `windw_size`, expected one of `log_root`, `window_size` at line 2 column 1",
        );
        match err {
            ConfigError::Parse {
                line,
                column,
                suggestion,
                ..
            } => {
                assert_eq!(line, Some(2));
                assert_eq!(column, Some(1));
                assert_eq!(suggestion.as_deref(), Some("window_size"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_suggestion_for_unrelated_name() {
        let err = ConfigError::from_saphyr_error(
            PathBuf::from("backtail.yaml"),
            "unknown field `zzz`",
        );
        assert!(matches!(err, ConfigError::Parse { suggestion: None, .. }));
    }

    #[test]
    fn test_cargo_style_output() {
        let err = ConfigError::Parse {
            path: PathBuf::from("backtail.yaml"),
            message: "unknown field `prot`".to_string(),
            line: Some(3),
            column: Some(1),
            suggestion: Some("port".to_string()),
        };
        let text = err.to_string();
        assert!(text.starts_with("error: unknown field `prot`"));
        assert!(text.contains("--> backtail.yaml:3:1"));
        assert!(text.contains("did you mean `port`?"));
    }
}
