//! MCP Resources Handler
//!
//! Implements resources/list and resources/read. A single resource is
//! exposed: the live buffer, rendered exactly like the vim_buffer tool.

use crate::mcp::types::MCPError;
use crate::services::EditorBridge;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// URI of the buffer snapshot resource
pub const BUFFER_RESOURCE_URI: &str = "nvim://buffer";

/// Parameters for resources/read
#[derive(Debug, Deserialize)]
pub struct ReadResourceParams {
    pub uri: String,
}

/// Handle resources/list
pub fn handle_resources_list(_params: Value) -> Result<Value, MCPError> {
    Ok(json!({
        "resources": [{
            "uri": BUFFER_RESOURCE_URI,
            "name": "Current Neovim buffer",
            "description": "Contents of the active buffer as numbered lines (\"N: text\")",
            "mimeType": "text/plain"
        }]
    }))
}

/// Handle resources/read
pub async fn handle_resources_read(
    bridge: &Arc<EditorBridge>,
    params: Value,
) -> Result<Value, MCPError> {
    let params: ReadResourceParams = serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))?;

    if params.uri != BUFFER_RESOURCE_URI {
        return Err(MCPError::invalid_params(format!(
            "Unknown resource: {}",
            params.uri
        )));
    }

    let snapshot = bridge.get_buffer_contents().await?;

    Ok(json!({
        "contents": [{
            "uri": BUFFER_RESOURCE_URI,
            "mimeType": "text/plain",
            "text": snapshot.render()
        }]
    }))
}
