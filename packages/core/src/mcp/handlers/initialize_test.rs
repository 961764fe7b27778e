//! Tests for MCP Initialize Handler

use super::*;
use serde_json::json;

#[test]
fn test_initialize_success() {
    let params = json!({
        "protocolVersion": "2024-11-05",
        "clientInfo": {
            "name": "test-client",
            "version": "1.0.0"
        }
    });

    let result = handle_initialize(params).unwrap();

    // Verify protocol version is echoed back
    assert_eq!(result["protocolVersion"], "2024-11-05");

    // Verify server info
    assert_eq!(result["serverInfo"]["name"], "neovim-mcp-server");
    assert!(result["serverInfo"]["version"].is_string());

    // Tools and resources are both advertised
    assert!(result["capabilities"]["tools"].is_object());
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
    assert!(result["capabilities"]["resources"].is_object());
    assert!(result["instructions"].as_str().unwrap().contains("1-based"));
}

#[test]
fn test_initialize_accepts_every_supported_version() {
    for version in SUPPORTED_PROTOCOL_VERSIONS {
        let result = handle_initialize(json!({ "protocolVersion": version })).unwrap();
        assert_eq!(result["protocolVersion"], *version);
    }
}

#[test]
fn test_initialize_wrong_version() {
    let params = json!({
        "protocolVersion": "1999-01-01",
        "clientInfo": {
            "name": "test-client"
        }
    });

    let err = handle_initialize(params).unwrap_err();

    assert_eq!(err.code, crate::mcp::types::INVALID_REQUEST);
    assert!(err.message.contains("Unsupported protocol version"));
    assert!(err.message.contains("1999-01-01"));
    assert!(err.message.contains("2024-11-05"));
}

#[test]
fn test_initialize_missing_version() {
    let params = json!({
        "clientInfo": {
            "name": "test-client"
        }
    });

    let err = handle_initialize(params).unwrap_err();

    assert_eq!(err.code, crate::mcp::types::INVALID_PARAMS);
    assert!(err.message.contains("Missing protocolVersion"));
}

#[test]
fn test_initialize_null_params() {
    let err = handle_initialize(serde_json::Value::Null).unwrap_err();
    assert_eq!(err.code, crate::mcp::types::INVALID_PARAMS);
}
