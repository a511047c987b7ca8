// Library interface for backtail
// The engine lives in `reader`, `filter` and `tail`; the rest is the CLI and HTTP front end.

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod reader;
pub mod signal;
pub mod tail;
pub mod web;

#[cfg(test)]
mod test_utils;

pub use error::{Result, TailError};
pub use tail::{peek, tail, Cursor, TailLine, TailPage, TailRequest};
