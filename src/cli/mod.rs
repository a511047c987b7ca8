//! CLI subcommand definitions for backtail.

use crate::tail::Cursor;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Available subcommands for backtail.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the most recent lines of a log file
    Tail(TailArgs),

    /// Serve the tail API over HTTP
    Serve(ServeArgs),

    /// Initialize a new backtail.yaml config file
    Init(InitArgs),

    /// Config file commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for the tail subcommand.
#[derive(Args, Debug)]
pub struct TailArgs {
    /// Log file to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Number of lines to print (default: `default_lines` from config)
    #[arg(short = 'n', long = "lines")]
    pub lines: Option<usize>,

    /// Only print lines containing this substring
    #[arg(short = 'k', long)]
    pub keyword: Option<String>,

    /// Case-insensitive keyword matching (ASCII only)
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Resume from a cursor printed by a previous call
    #[arg(long)]
    pub cursor: Option<Cursor>,

    /// Bytes per backward read, also the longest accepted line
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Read only the last window; fast, but may return fewer lines
    #[arg(long, conflicts_with = "cursor")]
    pub peek: bool,

    /// Output a JSON object instead of plain lines
    #[arg(long)]
    pub json: bool,

    /// Print in file order instead of most recent first
    #[arg(long)]
    pub oldest_first: bool,
}

/// Arguments for the serve subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Bind host (default: `host` from config)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (default: `port` from config)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Directory that `filename` parameters resolve against
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Bytes per backward read, also the longest accepted line
    #[arg(long)]
    pub window_size: Option<usize>,
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

/// Config subcommand actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the config file
    Validate,
    /// Show effective configuration
    Show,
}
