//! Single-shot JSON IO — read everything, then write one line.
//!
//! stdin is read to EOF before parsing; stdout receives exactly one JSON
//! object per invocation. All diagnostics go through tracing (stderr), so
//! stdout stays bit-exact JSON.

use std::io::Read;

use tasklens_core::error::Error;

/// Read stdin to EOF.
pub fn read_stdin() -> std::io::Result<String> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Parse the raw request body. A parse failure is the boundary error
/// `Invalid JSON input: <parser message>` — no component ever runs for it.
pub fn parse_input(raw: &str) -> Result<serde_json::Value, Error> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidInput(e.to_string()))
}

/// Write the response object as one line of UTF-8 JSON.
pub fn write_output(value: &serde_json::Value) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
