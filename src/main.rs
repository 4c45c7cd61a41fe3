//! salesdash CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, and on failure prints
//! the error and exits non-zero.

use salesdash::cli;

fn main() {
    if let Err(e) = cli::run() {
        let _ = cli::write_error(&e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
