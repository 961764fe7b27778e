//! MCP Initialize Handler
//!
//! Handles the MCP initialization handshake and capability discovery.
//! This is the first method called when a client connects to the server.

use crate::mcp::types::MCPError;
use serde_json::{json, Value};

/// Supported MCP protocol versions (newest first)
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Server name reported in `serverInfo`
pub const SERVER_NAME: &str = "neovim-mcp-server";

/// Handle MCP initialize request
///
/// Validates the client's protocol version and returns server capabilities.
/// Tool schemas are not included here; clients fetch them via `tools/list`.
///
/// # Errors
///
/// - `INVALID_PARAMS` if `protocolVersion` is missing
/// - `INVALID_REQUEST` if the version is not supported
pub fn handle_initialize(params: Value) -> Result<Value, MCPError> {
    let client_version = params["protocolVersion"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing protocolVersion parameter".to_string()))?;

    if !SUPPORTED_PROTOCOL_VERSIONS.contains(&client_version) {
        return Err(MCPError::invalid_request(format!(
            "Unsupported protocol version: {}. Server supports: {:?}",
            client_version, SUPPORTED_PROTOCOL_VERSIONS
        )));
    }

    Ok(json!({
        "protocolVersion": client_version,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            },
            "resources": {
                "subscribe": false,
                "listChanged": false
            }
        },
        "instructions": "Drives the Neovim instance the server is connected to. \
            Line numbers are 1-based. Read the buffer with vim_buffer before editing: \
            vim_edit in insert mode places lines before startLine (lastLine + 1 appends); \
            replace mode removes everything from startLine to the end of the buffer and \
            puts the new lines in its place. vim_command sends keys exactly as written, \
            using Neovim key notation such as <Esc> and <CR>."
    }))
}

// Include tests
#[cfg(test)]
#[path = "initialize_test.rs"]
mod initialize_test;
