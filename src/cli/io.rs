//! JSON output for the CLI
//!
//! Every successful command prints exactly one JSON object on stdout.
//! Failures go to stderr through `main`.

use std::io::{self, Write};

use serde_json::Value;

use super::errors::CliResult;

/// Wrap `data` in a success envelope
pub fn ok_envelope(data: Value) -> Value {
    serde_json::json!({
        "status": "ok",
        "data": data
    })
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &ok_envelope(data))?;
    writeln!(stdout)?;
    stdout.flush()?;
    Ok(())
}
