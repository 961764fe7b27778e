//! EditorApi Trait - Editor Abstraction Layer
//!
//! The primitives the bridge consumes from the editor, all addressing the
//! *current* buffer and window. Two implementations exist:
//!
//! - [`RpcEditor`](super::RpcEditor): msgpack-RPC to a live Neovim via `nvim-rs`
//! - [`InMemoryEditor`](super::InMemoryEditor): a plain line vector for tests
//!
//! # Addressing
//!
//! Line ranges use Neovim's native convention: 0-based, end-exclusive, with
//! negative indices counting from the end (`-1` is one past the last line).
//! Translating the agent's 1-based line numbers is the bridge's job, not the
//! implementation's.

use crate::models::{CursorPosition, EditorMode, FileInfo, WindowLayout};
use crate::nvim::EditorError;
use async_trait::async_trait;

/// Editor primitives used by `EditorBridge`
///
/// Implementations must be `Send + Sync`; the bridge is shared across tasks.
#[async_trait]
pub trait EditorApi: Send + Sync {
    /// Number of lines in the current buffer (never 0)
    async fn line_count(&self) -> Result<i64, EditorError>;

    /// Lines in `[start, end)` of the current buffer
    async fn get_lines(&self, start: i64, end: i64) -> Result<Vec<String>, EditorError>;

    /// Replace `[start, end)` with `replacement` as one atomic change
    ///
    /// `start == end` inserts before `start`.
    async fn set_lines(
        &self,
        start: i64,
        end: i64,
        replacement: Vec<String>,
    ) -> Result<(), EditorError>;

    /// Feed literal keystrokes, key notation included
    ///
    /// Returns after the editor has processed them, so queries issued next
    /// observe their effect. Input the editor did not fully accept is an error.
    async fn feed_input(&self, keys: &str) -> Result<(), EditorError>;

    async fn mode(&self) -> Result<EditorMode, EditorError>;

    async fn cursor(&self) -> Result<CursorPosition, EditorError>;

    async fn file_info(&self) -> Result<FileInfo, EditorError>;

    async fn window_layout(&self) -> Result<WindowLayout, EditorError>;

    /// Editor working directory
    async fn cwd(&self) -> Result<String, EditorError>;
}
