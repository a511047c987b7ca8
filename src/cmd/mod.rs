//! Subcommand implementations.
//!
//! Commands that can fail for reasons the user should fix report to stderr and
//! return an exit code; `tail` propagates with `anyhow`.

pub mod config;
pub mod init;
pub mod serve;
pub mod tail;

use crate::config::{self as cfg, Config};

/// Discover and load config, merging project over global.
///
/// Prints the Cargo-style error and returns exit code 1 on failure.
pub fn load_config() -> Result<Config, i32> {
    cfg::load(&cfg::discover()).map_err(|err| {
        eprintln!("{}", err);
        1
    })
}
