//! MCP Tools Handler
//!
//! Implements MCP-compliant tools/list and tools/call methods for the four
//! editor tools.
//!
//! ## Error reporting
//!
//! - Unknown tool or malformed arguments: JSON-RPC `INVALID_PARAMS` error
//! - Bridge failures (connection, line range, rejected input): a normal
//!   result with `isError: true` and the error message as text

use crate::mcp::handlers::editor;
use crate::mcp::types::{MCPError, INVALID_PARAMS};
use crate::services::EditorBridge;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

/// Handle tools/list request
pub fn handle_tools_list(_params: Value) -> Result<Value, MCPError> {
    Ok(json!({
        "tools": get_tool_schemas()
    }))
}

/// Handle tools/call request
///
/// Routes to the editor handler named by `params.name` with
/// `params.arguments` (an empty object when missing).
pub async fn handle_tools_call(
    bridge: &Arc<EditorBridge>,
    params: Value,
) -> Result<Value, MCPError> {
    let tool_name = params["name"]
        .as_str()
        .ok_or_else(|| MCPError::invalid_params("Missing 'name' parameter".to_string()))?;

    let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

    let result = match tool_name {
        "vim_buffer" => editor::handle_vim_buffer(bridge, arguments).await,
        "vim_command" => editor::handle_vim_command(bridge, arguments).await,
        "vim_status" => editor::handle_vim_status(bridge, arguments).await,
        "vim_edit" => editor::handle_vim_edit(bridge, arguments).await,
        _ => {
            return Err(MCPError::invalid_params(format!(
                "Unknown tool: {}",
                tool_name
            )))
        }
    };

    match result {
        Ok(text) => Ok(json!({
            "content": [{
                "type": "text",
                "text": text
            }],
            "isError": false
        })),
        // Malformed arguments never reached the editor
        Err(e) if e.code == INVALID_PARAMS => Err(e),
        Err(e) => {
            warn!("⚠️  Tool {} failed: {} (code: {})", tool_name, e.message, e.code);
            Ok(json!({
                "content": [{
                    "type": "text",
                    "text": e.message
                }],
                "isError": true,
                "_meta": {
                    "errorCode": e.code
                }
            }))
        }
    }
}

/// JSON schemas for every tool
fn get_tool_schemas() -> Value {
    json!([
        {
            "name": "vim_buffer",
            "description": "Get the contents of the current Neovim buffer as numbered lines (\"N: text\", 1-based)",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "Optional file name hint; the active buffer is always returned"
                    }
                }
            }
        },
        {
            "name": "vim_command",
            "description": "Send keys to Neovim exactly as written, then report mode and cursor. Uses Neovim key notation: <Esc> to leave insert mode, <CR> to run an ex command (e.g. \":w<CR>\"). Multiple commands can be chained in one string.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "Keys or commands in Neovim key notation"
                    }
                },
                "required": ["command"]
            }
        },
        {
            "name": "vim_status",
            "description": "Get editor status: mode, file name, cursor (1-based line and column), file flags (modified, modifiable, readonly), window layout and working directory",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "filename": {
                        "type": "string",
                        "description": "Optional file name hint; status is always for the active buffer"
                    }
                }
            }
        },
        {
            "name": "vim_edit",
            "description": "Edit the current buffer by line number. insert: put the lines before startLine (use last line + 1 to append). replace: remove every line from startLine to the end of the buffer and put the new lines in their place.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "startLine": {
                        "type": "integer",
                        "description": "1-based line where the edit starts"
                    },
                    "mode": {
                        "type": "string",
                        "enum": ["insert", "replace"],
                        "description": "insert shifts existing lines down; replace runs to the end of the buffer"
                    },
                    "lines": {
                        "type": "string",
                        "description": "New text; lines separated by \\n (\\r\\n accepted)"
                    }
                },
                "required": ["startLine", "mode", "lines"]
            }
        }
    ])
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tools_test;
