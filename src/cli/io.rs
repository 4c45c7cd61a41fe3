//! JSON I/O handling for CLI
//!
//! - Input: single JSON object via stdin
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{CliError, CliResult};

/// Read the JSON request object from stdin
pub fn read_request() -> CliResult<Value> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_request(&input)
}

/// Parse a request body; blank input means "no parameters"
pub fn parse_request(input: &str) -> CliResult<Value> {
    if input.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(input)?)
}

/// Write a success response to stdout
pub fn write_response<T: Serialize>(data: &T) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": serde_json::to_value(data)?
    });
    write_value(&response)
}

/// Write an error response to stdout
pub fn write_error(err: &CliError) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": err.code_str(),
        "message": err.message()
    });
    write_value(&response)
}

fn write_value(value: &Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
