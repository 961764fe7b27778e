//! MCP stdio Server
//!
//! Async Tokio task that handles JSON-RPC 2.0 requests over stdin/stdout.
//! Requests are processed one at a time in arrival order, so edits issued
//! by one client never interleave.

use crate::mcp::handlers::{initialize, resources, tools};
use crate::mcp::types::{MCPError, MCPNotification, MCPRequest, MCPResponse, RequestId};
use crate::services::EditorBridge;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, error, info, instrument, warn};

/// Callback type for handling successful responses
///
/// Receives (method_name, result_value) after a request succeeds.
pub type ResponseCallback = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// Run the MCP stdio server
///
/// Reads JSON-RPC messages from stdin, processes them via handlers,
/// and writes responses to stdout. Returns Ok(()) when stdin is closed.
#[instrument(skip(bridge))]
pub async fn run_mcp_server(bridge: Arc<EditorBridge>) -> anyhow::Result<()> {
    run_mcp_server_with_callback(bridge, None).await
}

/// Run the MCP stdio server with an optional response callback
#[instrument(skip(bridge, callback))]
pub async fn run_mcp_server_with_callback(
    bridge: Arc<EditorBridge>,
    callback: Option<ResponseCallback>,
) -> anyhow::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    serve(bridge, reader, writer, callback).await
}

/// Serve newline-delimited JSON-RPC over any reader/writer pair
///
/// Used by the stdio entry points and by tests driving the server through
/// in-memory pipes.
pub async fn serve<R, W>(
    bridge: Arc<EditorBridge>,
    reader: R,
    mut writer: W,
    callback: Option<ResponseCallback>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("🔌 MCP stdio server started");

    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!("📥 MCP message: {}", line);

        let message: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("❌ Failed to parse JSON-RPC message: {}", e);
                let error_response =
                    MCPResponse::error(None, MCPError::parse_error(format!("Invalid JSON: {}", e)));
                write_response(&mut writer, &error_response).await?;
                continue;
            }
        };

        if message.get("id").is_none() {
            handle_notification(message);
            continue;
        }

        let request: MCPRequest = match serde_json::from_value(message.clone()) {
            Ok(req) => req,
            Err(e) => {
                warn!("❌ Invalid JSON-RPC request: {}", e);
                let id = serde_json::from_value::<RequestId>(message["id"].clone()).ok();
                let error_response = MCPResponse::error(
                    id,
                    MCPError::invalid_request(format!("Invalid request: {}", e)),
                );
                write_response(&mut writer, &error_response).await?;
                continue;
            }
        };

        let request_id = request.id.clone();
        let method = request.method.clone();

        let response = handle_request(&bridge, request).await;

        if let Some(ref callback) = callback {
            if let Some(ref result) = response.result {
                callback(&method, result);
            }
        }

        debug!("📤 MCP response for method '{}' (id={})", method, request_id);

        write_response(&mut writer, &response).await?;
    }

    info!("🔌 MCP stdio server stopped (stdin closed)");
    Ok(())
}

/// Notifications are never answered
fn handle_notification(message: Value) {
    match serde_json::from_value::<MCPNotification>(message) {
        Ok(notification) => match notification.method.as_str() {
            "notifications/initialized" => info!("🤝 MCP client initialized"),
            other => debug!("Ignoring notification: {}", other),
        },
        Err(e) => warn!("❌ Dropping malformed notification: {}", e),
    }
}

/// Handle a JSON-RPC request and return a response
#[instrument(skip(bridge, request), fields(method = %request.method, id = %request.id))]
async fn handle_request(bridge: &Arc<EditorBridge>, request: MCPRequest) -> MCPResponse {
    let result = match request.method.as_str() {
        "initialize" => initialize::handle_initialize(request.params),
        "ping" => Ok(json!({})),
        "tools/list" => tools::handle_tools_list(request.params),
        "tools/call" => tools::handle_tools_call(bridge, request.params).await,
        "resources/list" => resources::handle_resources_list(request.params),
        "resources/read" => resources::handle_resources_read(bridge, request.params).await,
        _ => {
            warn!("⚠️  Unknown MCP method: {}", request.method);
            Err(MCPError::method_not_found(&request.method))
        }
    };

    match result {
        Ok(result) => {
            debug!("✅ MCP request {} succeeded", request.id);
            MCPResponse::success(request.id, result)
        }
        Err(error) => {
            error!(
                "❌ MCP request {} failed: {} (code: {})",
                request.id, error.message, error.code
            );
            MCPResponse::error(Some(request.id), error)
        }
    }
}

/// Write a JSON-RPC response as a single line
async fn write_response<W>(writer: &mut W, response: &MCPResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = serde_json::to_string(response)?;
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
