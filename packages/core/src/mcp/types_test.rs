//! Tests for MCP types module
//!
//! Verifies JSON-RPC 2.0 request/response parsing and error mapping.

#[cfg(test)]
mod tests {
    use crate::mcp::types::{
        MCPError, MCPNotification, MCPRequest, MCPResponse, RequestId, EDITOR_CONNECTION_FAILED,
        EDITOR_REJECTED_INPUT, INTERNAL_ERROR, INVALID_LINE_RANGE, INVALID_PARAMS,
        INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR,
    };
    use crate::models::EditMode;
    use crate::services::BridgeError;
    use serde_json::json;

    #[test]
    fn test_parse_valid_request() {
        let json_str = r#"{
            "jsonrpc": "2.0",
            "id": 123,
            "method": "tools/call",
            "params": {
                "name": "vim_command",
                "arguments": {"command": "ggdG"}
            }
        }"#;

        let request: MCPRequest = serde_json::from_str(json_str).unwrap();

        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.id, RequestId::Number(123));
        assert_eq!(request.method, "tools/call");
        assert_eq!(request.params["arguments"]["command"], "ggdG");
    }

    #[test]
    fn test_parse_request_with_string_id() {
        let json_str = r#"{"jsonrpc": "2.0", "id": "req-1", "method": "ping"}"#;

        let request: MCPRequest = serde_json::from_str(json_str).unwrap();

        assert_eq!(request.id, RequestId::String("req-1".to_string()));
        assert!(request.params.is_null());
    }

    #[test]
    fn test_parse_request_missing_jsonrpc() {
        let json_str = r#"{"id": 1, "method": "ping", "params": {}}"#;

        let result: Result<MCPRequest, _> = serde_json::from_str(json_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_request_wrong_jsonrpc_version() {
        let json_str = r#"{"jsonrpc": "1.0", "id": 1, "method": "ping"}"#;

        let result: Result<MCPRequest, _> = serde_json::from_str(json_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_request_without_id_should_fail() {
        let json_str = r#"{"jsonrpc": "2.0", "method": "tools/list", "params": {}}"#;

        let result: Result<MCPRequest, _> = serde_json::from_str(json_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_success_response() {
        let response = MCPResponse::success(RequestId::Number(42), json!({"tools": []}));

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 42);
        assert!(json["result"]["tools"].is_array());
        assert!(json.get("error").is_none()); // Should be omitted
    }

    #[test]
    fn test_serialize_error_response_without_id() {
        let response = MCPResponse::error(None, MCPError::parse_error("Invalid JSON".to_string()));

        let json = serde_json::to_value(&response).unwrap();

        assert!(json["id"].is_null());
        assert_eq!(json["error"]["code"], PARSE_ERROR);
        assert_eq!(json["error"]["message"], "Invalid JSON");
        assert!(json["error"].get("data").is_none());
        assert!(json.get("result").is_none());
    }

    #[test]
    fn test_error_codes_constants() {
        // Standard JSON-RPC error codes
        assert_eq!(PARSE_ERROR, -32700);
        assert_eq!(INVALID_REQUEST, -32600);
        assert_eq!(METHOD_NOT_FOUND, -32601);
        assert_eq!(INVALID_PARAMS, -32602);
        assert_eq!(INTERNAL_ERROR, -32603);

        // Bridge error codes (start at -32000 per JSON-RPC)
        assert_eq!(EDITOR_CONNECTION_FAILED, -32000);
        assert_eq!(INVALID_LINE_RANGE, -32001);
        assert_eq!(EDITOR_REJECTED_INPUT, -32002);
    }

    #[test]
    fn test_bridge_errors_map_to_distinct_codes() {
        let connection: MCPError = BridgeError::connection("socket closed").into();
        assert_eq!(connection.code, EDITOR_CONNECTION_FAILED);
        assert!(connection.message.contains("socket closed"));

        let range: MCPError = BridgeError::invalid_range(9, EditMode::Replace, 3).into();
        assert_eq!(range.code, INVALID_LINE_RANGE);
        let data = range.data.unwrap();
        assert_eq!(data["startLine"], 9);
        assert_eq!(data["lastLine"], 3);
        assert_eq!(data["maxStartLine"], 3);

        let rejected: MCPError =
            BridgeError::from(crate::nvim::EditorError::rejected("E492: Not an editor command"))
                .into();
        assert_eq!(rejected.code, EDITOR_REJECTED_INPUT);
        assert_eq!(rejected.message, "E492: Not an editor command");
    }

    // Notification tests

    #[test]
    fn test_parse_valid_notification() {
        let json_str = r#"{
            "jsonrpc": "2.0",
            "method": "notifications/initialized"
        }"#;

        let notification: MCPNotification = serde_json::from_str(json_str).unwrap();

        assert_eq!(notification.jsonrpc, "2.0");
        assert_eq!(notification.method, "notifications/initialized");
        assert!(notification.params.is_null());
    }

    #[test]
    fn test_notification_invalid_jsonrpc_version() {
        let json_str = r#"{"jsonrpc": "1.0", "method": "notifications/initialized"}"#;

        let result: Result<MCPNotification, _> = serde_json::from_str(json_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_notification_with_id_should_be_request() {
        let json_str = r#"{
            "jsonrpc": "2.0",
            "id": 123,
            "method": "initialize",
            "params": {}
        }"#;

        let request: Result<MCPRequest, _> = serde_json::from_str(json_str);
        assert!(request.is_ok());

        // deny_unknown_fields rejects 'id'
        let notification: Result<MCPNotification, _> = serde_json::from_str(json_str);
        assert!(notification.is_err());
    }
}
