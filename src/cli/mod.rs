//! CLI module for salesdash
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP server
//! - query: One-shot records request
//! - explain: Show the query a request builds
//! - options: Filter option values
//! - summary: One-shot summary statistics

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{explain, open_dashboard, options, query, run, run_command, serve, summary};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
