//! MCP Request Handlers
//!
//! Handler modules for different MCP operations.

pub mod editor;
pub mod initialize;
pub mod resources;
pub mod tools;
