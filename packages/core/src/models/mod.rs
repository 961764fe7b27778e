//! Data Models
//!
//! Agent-facing data structures exchanged with the editor bridge:
//!
//! - `BufferSnapshot` - 1-based view of the active buffer
//! - `EditRequest` / `EditMode` - structured line edits
//! - `StatusReport` and its parts - merged editor state
//!
//! All models are rebuilt from the editor on every request; none are cached.

mod buffer;
mod edit;
mod status;

pub use buffer::BufferSnapshot;
pub use edit::{split_payload, EditMode, EditRequest};
pub use status::{
    mode_cursor_summary, mode_name, CursorPosition, EditorMode, FileInfo, SplitKind, StatusReport, WindowLayout,
};
