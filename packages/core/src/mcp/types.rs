//! MCP JSON-RPC 2.0 Types
//!
//! Type definitions for Model Context Protocol communication.
//! Implements JSON-RPC 2.0 over newline-delimited stdio.

use crate::services::BridgeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Request identifier: JSON-RPC allows numbers or strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for RequestId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

/// Only "2.0" is accepted
fn deserialize_jsonrpc<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let version = String::deserialize(deserializer)?;
    if version != "2.0" {
        return Err(serde::de::Error::custom(format!(
            "unsupported jsonrpc version: {}",
            version
        )));
    }
    Ok(version)
}

/// JSON-RPC 2.0 request structure
///
/// # Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 7,
///     "method": "tools/call",
///     "params": {
///         "name": "vim_edit",
///         "arguments": { "startLine": 2, "mode": "insert", "lines": "x\ny" }
///     }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct MCPRequest {
    /// JSON-RPC version (must be "2.0")
    #[serde(deserialize_with = "deserialize_jsonrpc")]
    pub jsonrpc: String,

    /// Request identifier (used to match responses)
    pub id: RequestId,

    /// Method name to invoke
    pub method: String,

    /// Method parameters (absent params become `null`)
    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 notification (no id, never answered)
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MCPNotification {
    #[serde(deserialize_with = "deserialize_jsonrpc")]
    pub jsonrpc: String,

    pub method: String,

    #[serde(default)]
    pub params: Value,
}

/// JSON-RPC 2.0 response structure
///
/// # Error Example
///
/// ```json
/// {
///     "jsonrpc": "2.0",
///     "id": 7,
///     "error": { "code": -32602, "message": "Invalid parameters: missing field `command`" }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct MCPResponse {
    /// JSON-RPC version (always "2.0")
    pub jsonrpc: String,

    /// Request identifier, `null` when the request could not be parsed
    pub id: Option<RequestId>,

    /// Success result (mutually exclusive with error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error information (mutually exclusive with result)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<MCPError>,
}

/// JSON-RPC 2.0 error structure
#[derive(Debug, Serialize, Clone)]
pub struct MCPError {
    /// Error code (standard JSON-RPC or bridge-specific)
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Optional structured details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// JSON-RPC 2.0 standard error codes
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// Bridge-specific error codes (application errors: -32000 to -32099)
pub const EDITOR_CONNECTION_FAILED: i32 = -32000;
pub const INVALID_LINE_RANGE: i32 = -32001;
pub const EDITOR_REJECTED_INPUT: i32 = -32002;

impl MCPError {
    fn new(code: i32, message: String) -> Self {
        Self {
            code,
            message,
            data: None,
        }
    }

    /// Attach structured details
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Create a parse error
    pub fn parse_error(message: String) -> Self {
        Self::new(PARSE_ERROR, message)
    }

    /// Create an invalid request error
    pub fn invalid_request(message: String) -> Self {
        Self::new(INVALID_REQUEST, message)
    }

    /// Create a method not found error
    pub fn method_not_found(method: &str) -> Self {
        Self::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Create an invalid params error
    pub fn invalid_params(message: String) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    /// Create an internal error
    pub fn internal_error(message: String) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    /// Create an editor connection error
    pub fn editor_connection_failed(message: String) -> Self {
        Self::new(EDITOR_CONNECTION_FAILED, message)
    }

    /// Create an invalid line range error
    pub fn invalid_line_range(message: String) -> Self {
        Self::new(INVALID_LINE_RANGE, message)
    }

    /// Create an editor rejected input error
    pub fn editor_rejected_input(message: String) -> Self {
        Self::new(EDITOR_REJECTED_INPUT, message)
    }
}

impl From<BridgeError> for MCPError {
    fn from(err: BridgeError) -> Self {
        let message = err.to_string();
        match err {
            BridgeError::Connection(_) => Self::editor_connection_failed(message),
            BridgeError::InvalidRange {
                start_line,
                last_line,
                max_start,
                ..
            } => Self::invalid_line_range(message).with_data(serde_json::json!({
                "startLine": start_line,
                "lastLine": last_line,
                "maxStartLine": max_start,
            })),
            BridgeError::EditorRejectedInput(_) => Self::editor_rejected_input(message),
        }
    }
}

impl MCPResponse {
    /// Create a success response
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response; `id` is `None` when it could not be read
    pub fn error(id: Option<RequestId>, error: MCPError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

// Include tests
#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
