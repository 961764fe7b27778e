//! MCP Editor Handlers
//!
//! Typed parameter parsing for the four editor tools, delegating to
//! `EditorBridge`. Malformed arguments are rejected here as `INVALID_PARAMS`
//! before the bridge is reached; bridge failures keep their own codes.

use crate::mcp::types::MCPError;
use crate::models::EditRequest;
use crate::services::EditorBridge;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Parameters for vim_buffer
#[derive(Debug, Default, Deserialize)]
pub struct BufferParams {
    /// Accepted for compatibility; the active buffer is always read
    #[serde(default)]
    pub filename: Option<String>,
}

/// Parameters for vim_command
#[derive(Debug, Deserialize)]
pub struct CommandParams {
    pub command: String,
}

/// Parameters for vim_status
#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    /// Accepted for compatibility; status is always for the active buffer
    #[serde(default)]
    pub filename: Option<String>,
}

/// Parse tool arguments, treating absent arguments as an empty object
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, MCPError> {
    let params = if params.is_null() {
        Value::Object(Default::default())
    } else {
        params
    };
    serde_json::from_value(params)
        .map_err(|e| MCPError::invalid_params(format!("Invalid parameters: {}", e)))
}

/// Handle vim_buffer: numbered buffer contents
pub async fn handle_vim_buffer(
    bridge: &Arc<EditorBridge>,
    params: Value,
) -> Result<String, MCPError> {
    let params: BufferParams = parse_params(params)?;
    if let Some(filename) = &params.filename {
        debug!("vim_buffer filename hint ignored: {}", filename);
    }

    let snapshot = bridge.get_buffer_contents().await?;
    Ok(snapshot.render())
}

/// Handle vim_command: raw keys, then mode and cursor
pub async fn handle_vim_command(
    bridge: &Arc<EditorBridge>,
    params: Value,
) -> Result<String, MCPError> {
    let params: CommandParams = parse_params(params)?;
    Ok(bridge.send_command(&params.command).await?)
}

/// Handle vim_status: pretty-printed status report
pub async fn handle_vim_status(
    bridge: &Arc<EditorBridge>,
    params: Value,
) -> Result<String, MCPError> {
    let params: StatusParams = parse_params(params)?;
    if let Some(filename) = &params.filename {
        debug!("vim_status filename hint ignored: {}", filename);
    }

    let report = bridge.get_status().await?;
    serde_json::to_string_pretty(&report)
        .map_err(|e| MCPError::internal_error(format!("Failed to serialize status: {}", e)))
}

/// Handle vim_edit: structured insert/replace
pub async fn handle_vim_edit(
    bridge: &Arc<EditorBridge>,
    params: Value,
) -> Result<String, MCPError> {
    let request: EditRequest = parse_params(params)?;
    Ok(bridge.edit_lines(&request).await?)
}
