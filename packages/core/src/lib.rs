//! Neovim MCP Core
//!
//! Bridges an AI agent to a running Neovim instance over the Model Context
//! Protocol.
//!
//! # Architecture
//!
//! - **msgpack-RPC**: talks to Neovim through `nvim-rs` on a socket, TCP port or embedded child
//! - **Lazy connection**: the editor is dialed on first use and the handle is shared afterwards
//! - **Structured edits**: whole-line insert/replace in a single buffer update
//!
//! # Modules
//!
//! - [`config`] - Connection settings and environment resolution
//! - [`models`] - Buffer snapshots, edit requests, status reports
//! - [`nvim`] - Editor API trait, RPC client, in-memory editor, connection handle
//! - [`services`] - `EditorBridge` operations and their error type
//! - [`mcp`] - MCP stdio server for AI agent integration

pub mod config;
pub mod mcp;
pub mod models;
pub mod nvim;
pub mod services;

// Re-export commonly used types
pub use config::BridgeConfig;
pub use models::*;
pub use nvim::{EditorApi, EditorConnection, EditorError, InMemoryEditor};
pub use services::*;
