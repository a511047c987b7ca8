//! Config validate and show commands for backtail.
//!
//! Provides config introspection and validation for CI pipelines and developer debugging.

use crate::config::{self, Config};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Get the effective config path (closest wins: project > global).
fn effective_config_path() -> Option<PathBuf> {
    config::discover().closest().map(Path::to_path_buf)
}

/// Validate the effective config file.
///
/// Quiet on success; errors go to stderr with exit code 1. Besides syntax and
/// field names this checks that `log_root` and `default_file` exist.
pub fn validate() -> Result<(), i32> {
    let config_path = match effective_config_path() {
        Some(path) => path,
        None => {
            eprintln!("error: No config found to validate");
            return Err(1);
        }
    };

    match config::load_single_file(&config_path) {
        Ok(cfg) => {
            let problems = filesystem_problems(&cfg);
            for problem in &problems {
                eprintln!("error: {}", problem);
            }
            if problems.is_empty() {
                Ok(())
            } else {
                Err(1)
            }
        }
        Err(e) => {
            eprintln!("{}", e);
            Err(1)
        }
    }
}

/// Paths named by the config that do not exist on this machine.
fn filesystem_problems(cfg: &Config) -> Vec<String> {
    let mut problems = Vec::new();
    if !cfg.log_root.is_dir() {
        problems.push(format!(
            "log_root is not a directory: {}",
            cfg.log_root.display()
        ));
    } else if let Some(file) = &cfg.default_file {
        let path = cfg.log_root.join(file);
        if !path.is_file() {
            problems.push(format!("default_file not found: {}", path.display()));
        }
    }
    problems
}

/// Show the effective configuration.
///
/// With no config file the defaults are shown.
/// Respects NO_COLOR environment variable via the colored crate.
pub fn show() -> Result<(), i32> {
    match effective_config_path() {
        Some(path) => match config::load_single_file(&path) {
            Ok(cfg) => {
                println!("Using: {}", path.display().to_string().dimmed());
                println!();
                show_config(&cfg);
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", e);
                Err(1)
            }
        },
        None => {
            println!("{}", "No config found. Using defaults.".dimmed());
            println!();
            show_config(&Config::default());
            Ok(())
        }
    }
}

fn show_config(cfg: &Config) {
    let root_status = if cfg.log_root.is_dir() {
        String::new()
    } else {
        format!(" {}", "(not found)".red())
    };
    println!(
        "{}: {}{}",
        "log_root".cyan(),
        cfg.log_root.display().to_string().yellow(),
        root_status
    );
    println!("{}: {}", "window_size".cyan(), cfg.window_size.to_string().green());
    println!("{}: {}", "default_lines".cyan(), cfg.default_lines.to_string().green());
    println!("{}: {}", "max_lines".cyan(), cfg.max_lines.to_string().green());
    match &cfg.default_file {
        Some(file) => println!("{}: {}", "default_file".cyan(), file.yellow()),
        None => println!("{}: {}", "default_file".cyan(), "(not set)".dimmed()),
    }
    println!("{}: {}", "listen".cyan(), cfg.bind_addr().green());
}
