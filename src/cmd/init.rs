//! `backtail init`: write a commented config template.

use crate::cli::InitArgs;
use crate::config::discovery::PROJECT_CONFIG_NAME;
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const TEMPLATE: &str = r#"# backtail configuration
#
# Values below are the defaults. Uncomment a line to change it.

# Directory that the HTTP `filename` parameter is resolved against.
# log_root: /var/log

# Bytes read per backward step. Lines longer than this are rejected.
# window_size: 32768

# Lines returned when a request does not say how many.
# default_lines: 100

# Largest `size` the HTTP API accepts.
# max_lines: 10000

# File served when a request names none (relative to log_root).
# default_file: syslog

# HTTP bind address.
# host: 127.0.0.1
# port: 8080
"#;

pub fn run(args: &InitArgs) -> Result<(), i32> {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("error: Cannot determine current directory: {}", err);
            return Err(1);
        }
    };

    match write_template(&cwd, args.force) {
        Ok(path) => {
            println!("{} {}", "Created".green(), path.display());
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            eprintln!(
                "error: {} already exists (use --force to overwrite)",
                cwd.join(PROJECT_CONFIG_NAME).display()
            );
            Err(1)
        }
        Err(err) => {
            eprintln!("error: Cannot write {}: {}", PROJECT_CONFIG_NAME, err);
            Err(1)
        }
    }
}

/// Write the template into `dir`, refusing to clobber unless `force`.
fn write_template(dir: &Path, force: bool) -> io::Result<PathBuf> {
    let path = dir.join(PROJECT_CONFIG_NAME);
    if !force && path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "config file exists",
        ));
    }
    fs::write(&path, TEMPLATE)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_single_file, Config};
    use tempfile::TempDir;

    #[test]
    fn test_template_loads_as_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_template(temp.path(), false).unwrap();
        assert_eq!(load_single_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_NAME), "port: 1\n").unwrap();

        let err = write_template(temp.path(), false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(
            fs::read_to_string(temp.path().join(PROJECT_CONFIG_NAME)).unwrap(),
            "port: 1\n"
        );
    }

    #[test]
    fn test_force_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PROJECT_CONFIG_NAME), "port: 1\n").unwrap();

        write_template(temp.path(), true).unwrap();
        let content = fs::read_to_string(temp.path().join(PROJECT_CONFIG_NAME)).unwrap();
        assert!(content.starts_with("# backtail configuration"));
    }
}
