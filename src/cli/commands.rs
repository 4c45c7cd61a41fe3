//! CLI command implementations
//!
//! Every command loads the configuration first. Commands that read data
//! load the JSON dataset into an in-memory store and go through the same
//! `Dashboard` the HTTP server uses.

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::config::DashboardConfig;
use crate::http_server::HttpServer;
use crate::observability::init_tracing;
use crate::query::{QueryBuilder, QuerySpec, SalesQuery, SummaryCriteria};
use crate::service::{Dashboard, SalesPage, SalesSummary};
use crate::store::InMemoryRecordStore;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Query { config } => query(&config),
        Command::Explain { config } => explain(&config),
        Command::Options { config } => options(&config),
        Command::Summary { config } => summary(&config),
    }
}

/// Load configuration and install logging
fn load_config(config_path: &Path) -> CliResult<DashboardConfig> {
    let config = DashboardConfig::load(config_path)?;
    init_tracing(config.log_format);
    Ok(config)
}

/// Load the dataset named by the configuration
pub fn open_dashboard(config: &DashboardConfig) -> CliResult<Dashboard> {
    let store = InMemoryRecordStore::load_json(&config.data_path)?;
    Ok(Dashboard::new(Arc::new(store), config))
}

/// Start the HTTP server
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    let dashboard = Arc::new(open_dashboard(&config)?);
    let server = HttpServer::new(config.http.clone(), dashboard);
    info!(addr = %server.socket_addr(), "starting HTTP server");

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Run one records request from stdin
pub fn query(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request = read_request()?;

    let dashboard = open_dashboard(&config)?;
    write_response(&records_for(&dashboard, &request)?)
}

/// Print the query specification for a request from stdin
pub fn explain(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request = read_request()?;

    write_response(&explain_for(&QueryBuilder::new(config.query), &request)?)
}

/// Print the filter options
pub fn options(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;

    let dashboard = open_dashboard(&config)?;
    write_response(&dashboard.filter_options()?)
}

/// Summarize records for a selection from stdin
pub fn summary(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let request = read_request()?;

    let dashboard = open_dashboard(&config)?;
    write_response(&summary_for(&dashboard, &request)?)
}

/// Records page for a JSON request; decoded exactly like a query string
fn records_for(dashboard: &Dashboard, request: &Value) -> CliResult<SalesPage> {
    let query = SalesQuery::from_json(request)?;
    Ok(dashboard.records(&query)?)
}

fn explain_for(builder: &QueryBuilder, request: &Value) -> CliResult<QuerySpec> {
    let query = SalesQuery::from_json(request)?;
    Ok(builder.build(&query)?)
}

fn summary_for(dashboard: &Dashboard, request: &Value) -> CliResult<SalesSummary> {
    let criteria = SummaryCriteria::from_json(request)?;
    Ok(dashboard.summary(&criteria)?)
}
