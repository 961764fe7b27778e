//! Business Services
//!
//! - `EditorBridge` - buffer reads, raw commands, status and structured edits
//! - `BridgeError` - the error kinds reported to callers
//!
//! The bridge coordinates between the editor layer and the MCP handlers,
//! owning all line-number translation and result formatting.

pub mod editor_bridge;
pub mod error;

pub use editor_bridge::{plan_edit, EditorBridge, LineRangeEdit};
pub use error::BridgeError;
