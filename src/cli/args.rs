//! CLI argument definitions using clap
//!
//! Commands:
//! - salesdash serve --config <path> [--port <port>]
//! - salesdash query --config <path>
//! - salesdash explain --config <path>
//! - salesdash options --config <path>
//! - salesdash summary --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// salesdash - sales records dashboard service
#[derive(Parser, Debug)]
#[command(name = "salesdash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the dataset and start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,

        /// Override the configured HTTP port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one records request read from stdin
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,
    },

    /// Print the query a request from stdin builds, without reading data
    Explain {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,
    },

    /// Print the available filter options
    Options {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,
    },

    /// Summarize records for a region/category selection read from stdin
    Summary {
        /// Path to configuration file
        #[arg(long, default_value = "./salesdash.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
