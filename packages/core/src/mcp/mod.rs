//! Model Context Protocol (MCP) Integration
//!
//! stdio-based JSON-RPC 2.0 server giving AI agents access to a running
//! Neovim instance through four tools and one resource.
//!
//! # Architecture
//!
//! - **Thin protocol layer**: handlers parse arguments and delegate to `EditorBridge`
//! - **stdio transport**: newline-delimited JSON-RPC 2.0 over stdin/stdout
//! - **Sequential processing**: one request at a time, in arrival order
//!
//! # Usage
//!
//! ```json
//! {
//!   "jsonrpc": "2.0",
//!   "id": 1,
//!   "method": "tools/call",
//!   "params": {
//!     "name": "vim_edit",
//!     "arguments": { "startLine": 3, "mode": "replace", "lines": "fn main() {}" }
//!   }
//! }
//! ```

pub mod handlers;
pub mod server;
pub mod types;

pub use server::{run_mcp_server, run_mcp_server_with_callback, serve, ResponseCallback};
pub use types::{MCPError, MCPRequest, MCPResponse, RequestId};
