//! In-memory editor
//!
//! A line vector behind a mutex that follows Neovim's range semantics closely
//! enough to test the bridge without a running editor: strict 0-based
//! end-exclusive ranges, negative indices from the end, and a buffer that is
//! never zero lines long.
//!
//! Raw input is recorded rather than interpreted. Tests can make the channel
//! fail or make the next input be rejected.

use crate::models::{CursorPosition, EditorMode, FileInfo, SplitKind, WindowLayout};
use crate::nvim::{EditorApi, EditorError};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct State {
    lines: Vec<String>,
    mode: EditorMode,
    cursor: CursorPosition,
    filename: String,
    modified: bool,
    inputs: Vec<String>,
    set_lines_calls: usize,
    reject_input: Option<String>,
    disconnected: bool,
}

/// Test double for [`EditorApi`]
#[derive(Debug)]
pub struct InMemoryEditor {
    state: Mutex<State>,
}

impl InMemoryEditor {
    /// Empty unnamed buffer (one empty line)
    pub fn new() -> Self {
        Self::with_lines(Vec::<String>::new())
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            state: Mutex::new(State {
                lines,
                mode: EditorMode::normal(),
                cursor: CursorPosition { line: 1, column: 1 },
                filename: String::new(),
                modified: false,
                inputs: Vec::new(),
                set_lines_calls: 0,
                reject_input: None,
                disconnected: false,
            }),
        }
    }

    pub fn with_filename(self, filename: impl Into<String>) -> Self {
        self.lock().filename = filename.into();
        self
    }

    /// Current buffer contents
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.clone()
    }

    /// Every string passed to `feed_input`, in order
    pub fn inputs(&self) -> Vec<String> {
        self.lock().inputs.clone()
    }

    /// Number of `set_lines` calls that reached the buffer
    pub fn set_lines_calls(&self) -> usize {
        self.lock().set_lines_calls
    }

    pub fn set_mode(&self, mode: EditorMode) {
        self.lock().mode = mode;
    }

    pub fn set_cursor(&self, cursor: CursorPosition) {
        self.lock().cursor = cursor;
    }

    /// Make the next `feed_input` fail with `message`
    pub fn reject_next_input(&self, message: impl Into<String>) {
        self.lock().reject_input = Some(message.into());
    }

    /// Make every subsequent call fail as if the channel broke
    pub fn disconnect(&self) {
        self.lock().disconnected = true;
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock only means a test panicked mid-call; the data is still usable
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn connected(&self) -> Result<MutexGuard<'_, State>, EditorError> {
        let state = self.lock();
        if state.disconnected {
            return Err(EditorError::channel("connection to Neovim closed"));
        }
        Ok(state)
    }
}

impl Default for InMemoryEditor {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a Neovim-style index (negative counts from the end) to a position
fn resolve_index(index: i64, len: usize) -> Result<usize, EditorError> {
    let len = len as i64;
    let resolved = if index < 0 { len + 1 + index } else { index };
    if resolved < 0 || resolved > len {
        return Err(EditorError::rejected("Index out of bounds"));
    }
    Ok(resolved as usize)
}

fn resolve_range(start: i64, end: i64, len: usize) -> Result<(usize, usize), EditorError> {
    let start = resolve_index(start, len)?;
    let end = resolve_index(end, len)?;
    if start > end {
        return Err(EditorError::rejected("'start' is higher than 'end'"));
    }
    Ok((start, end))
}

#[async_trait]
impl EditorApi for InMemoryEditor {
    async fn line_count(&self) -> Result<i64, EditorError> {
        Ok(self.connected()?.lines.len() as i64)
    }

    async fn get_lines(&self, start: i64, end: i64) -> Result<Vec<String>, EditorError> {
        let state = self.connected()?;
        let (start, end) = resolve_range(start, end, state.lines.len())?;
        Ok(state.lines[start..end].to_vec())
    }

    async fn set_lines(
        &self,
        start: i64,
        end: i64,
        replacement: Vec<String>,
    ) -> Result<(), EditorError> {
        let mut state = self.connected()?;
        let (start, end) = resolve_range(start, end, state.lines.len())?;
        state.lines.splice(start..end, replacement);
        if state.lines.is_empty() {
            state.lines.push(String::new());
        }
        state.set_lines_calls += 1;
        state.modified = true;
        Ok(())
    }

    async fn feed_input(&self, keys: &str) -> Result<(), EditorError> {
        let mut state = self.connected()?;
        if let Some(message) = state.reject_input.take() {
            return Err(EditorError::rejected(message));
        }
        state.inputs.push(keys.to_string());
        Ok(())
    }

    async fn mode(&self) -> Result<EditorMode, EditorError> {
        Ok(self.connected()?.mode.clone())
    }

    async fn cursor(&self) -> Result<CursorPosition, EditorError> {
        Ok(self.connected()?.cursor)
    }

    async fn file_info(&self) -> Result<FileInfo, EditorError> {
        let state = self.connected()?;
        let size_bytes = state.lines.iter().map(|line| line.len() as i64 + 1).sum();
        Ok(FileInfo {
            filename: state.filename.clone(),
            line_count: state.lines.len() as i64,
            size_bytes,
            modified: state.modified,
            modifiable: true,
            readonly: false,
            filetype: String::new(),
        })
    }

    async fn window_layout(&self) -> Result<WindowLayout, EditorError> {
        drop(self.connected()?);
        Ok(WindowLayout {
            window_count: 1,
            width: 80,
            height: 24,
            split: SplitKind::Leaf,
        })
    }

    async fn cwd(&self) -> Result<String, EditorError> {
        drop(self.connected()?);
        Ok("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_negative_end_addresses_past_last_line() {
        let editor = InMemoryEditor::with_lines(["a", "b", "c"]);
        assert_eq!(editor.get_lines(1, -1).await.unwrap(), vec!["b", "c"]);
        assert_eq!(editor.get_lines(0, -1).await.unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_out_of_bounds_is_rejected() {
        let editor = InMemoryEditor::with_lines(["a"]);
        assert!(matches!(
            editor.get_lines(0, 5).await,
            Err(EditorError::Rejected(_))
        ));
        assert!(editor.set_lines(3, 3, vec!["x".into()]).await.is_err());
        assert_eq!(editor.lines(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_clearing_leaves_one_empty_line() {
        let editor = InMemoryEditor::with_lines(["a", "b"]);
        editor.set_lines(0, -1, Vec::new()).await.unwrap();
        assert_eq!(editor.lines(), vec![""]);
        assert_eq!(editor.line_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_fails_every_call() {
        let editor = InMemoryEditor::new();
        editor.disconnect();
        assert!(matches!(
            editor.line_count().await,
            Err(EditorError::Channel(_))
        ));
        assert!(editor.feed_input("i").await.is_err());
    }

    #[tokio::test]
    async fn test_reject_next_input_only_once() {
        let editor = InMemoryEditor::new();
        editor.reject_next_input("E1: bad key");
        assert!(editor.feed_input("<bogus>").await.is_err());
        assert!(editor.feed_input("ihello<Esc>").await.is_ok());
        assert_eq!(editor.inputs(), vec!["ihello<Esc>"]);
    }
}
