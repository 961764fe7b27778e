//! Editor Bridge - Agent Operations over Neovim
//!
//! The translation layer between agent requests and editor primitives:
//!
//! - Buffer snapshot (`get_buffer_contents`)
//! - Raw command pass-through (`send_command`)
//! - Merged status (`get_status`)
//! - Structured line edits (`edit_lines`)
//!
//! # Addressing
//!
//! Agents speak 1-based line numbers with an insert/replace mode. Neovim's
//! `nvim_buf_set_lines` takes a 0-based, end-exclusive range and replaces it
//! with a list of lines. Every structured edit becomes exactly one such call:
//!
//! | mode    | valid `startLine`   | range sent to Neovim        |
//! |---------|---------------------|-----------------------------|
//! | insert  | `1..=lastLine + 1`  | `[startLine-1, startLine-1)` |
//! | replace | `1..=lastLine`      | `[startLine-1, -1)`         |
//!
//! Replace always runs to the end of the buffer, however many lines the
//! payload has.
//!
//! # Consistency
//!
//! Nothing is cached. Each operation reads what it needs from the editor at
//! call time, so the agent's view is whatever Neovim reports now. Operations
//! are not serialized here; the stdio server handles one request at a time.

use crate::models::{mode_cursor_summary, BufferSnapshot, EditMode, EditRequest, StatusReport};
use crate::nvim::{EditorApi, EditorConnection};
use crate::services::error::BridgeError;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Neovim's index for "one past the last line"
const END_OF_BUFFER: i64 = -1;

/// A structured edit translated to Neovim's addressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRangeEdit {
    /// 0-based first line to replace
    pub start: i64,
    /// 0-based end (exclusive); [`END_OF_BUFFER`] for replace-to-end
    pub end: i64,
    pub replacement: Vec<String>,
}

/// Validate `request` against a buffer of `line_count` lines and translate it
///
/// Fails with [`BridgeError::InvalidRange`] when the start line is outside the
/// span the mode allows.
pub fn plan_edit(request: &EditRequest, line_count: i64) -> Result<LineRangeEdit, BridgeError> {
    if !request
        .mode
        .valid_start_lines(line_count)
        .contains(&request.start_line)
    {
        return Err(BridgeError::invalid_range(
            request.start_line,
            request.mode,
            line_count,
        ));
    }

    let start = request.start_line - 1;
    let end = match request.mode {
        EditMode::Insert => start,
        EditMode::Replace => END_OF_BUFFER,
    };

    Ok(LineRangeEdit {
        start,
        end,
        replacement: request.payload_lines(),
    })
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "line"
    } else {
        "lines"
    }
}

/// Confirmation text for an applied edit
fn describe_edit(request: &EditRequest, inserted: usize, line_count: i64) -> String {
    let start = request.start_line;
    match request.mode {
        EditMode::Insert if inserted == 0 => {
            format!("Inserted 0 lines at line {} (buffer unchanged)", start)
        }
        EditMode::Insert => format!(
            "Inserted {} {} at line {} (now lines {}-{})",
            inserted,
            plural(inserted),
            start,
            start,
            start + inserted as i64 - 1
        ),
        EditMode::Replace => {
            let removed = (line_count - start + 1) as usize;
            format!(
                "Replaced lines {}-{} ({} {}) with {} {}",
                start,
                line_count,
                removed,
                plural(removed),
                inserted,
                plural(inserted)
            )
        }
    }
}

/// The four agent-facing editor operations
pub struct EditorBridge {
    connection: EditorConnection,
}

impl EditorBridge {
    pub fn new(connection: EditorConnection) -> Self {
        Self { connection }
    }

    /// Bridge over an already connected editor
    pub fn with_editor(editor: Arc<dyn EditorApi>) -> Self {
        Self::new(EditorConnection::with_editor(editor))
    }

    pub fn connection(&self) -> &EditorConnection {
        &self.connection
    }

    async fn editor(&self) -> Result<Arc<dyn EditorApi>, BridgeError> {
        self.connection
            .get()
            .await
            .map_err(|e| BridgeError::connection(e.to_string()))
    }

    /// Snapshot of the whole active buffer
    #[instrument(skip(self))]
    pub async fn get_buffer_contents(&self) -> Result<BufferSnapshot, BridgeError> {
        let editor = self.editor().await?;
        let lines = editor.get_lines(0, END_OF_BUFFER).await?;
        debug!("📄 Read {} buffer lines", lines.len());
        Ok(BufferSnapshot::from_lines(lines))
    }

    /// Feed `command` to Neovim verbatim and report mode and cursor afterwards
    ///
    /// The string is not parsed: key notation such as `<Esc>` or `<CR>` and any
    /// chaining are interpreted by Neovim itself. `feed_input` returns once the
    /// keys have been processed, so mode and cursor describe the state after
    /// the command.
    #[instrument(skip(self))]
    pub async fn send_command(&self, command: &str) -> Result<String, BridgeError> {
        let editor = self.editor().await?;
        editor.feed_input(command).await?;

        let mode = editor.mode().await?;
        let cursor = editor.cursor().await?;
        info!("⌨️  Sent command, editor now in {} at {}", mode, cursor);

        Ok(format!(
            "Command sent: {}\n{}",
            command,
            mode_cursor_summary(&mode, &cursor)
        ))
    }

    /// Mode, cursor, file metadata, window layout and cwd in one report
    ///
    /// The queries are independent and run concurrently; any failure fails
    /// the whole report.
    #[instrument(skip(self))]
    pub async fn get_status(&self) -> Result<StatusReport, BridgeError> {
        let editor = self.editor().await?;

        let (mode, cursor, file_info, window_layout, cwd) = tokio::try_join!(
            editor.mode(),
            editor.cursor(),
            editor.file_info(),
            editor.window_layout(),
            editor.cwd(),
        )?;

        Ok(StatusReport {
            mode,
            filename: file_info.filename.clone(),
            cursor,
            file_info,
            window_layout,
            cwd,
        })
    }

    /// Apply a structured edit as a single line-range replacement
    ///
    /// Returns a confirmation naming the mode and affected range. The new
    /// buffer is not returned; read it with `get_buffer_contents`.
    #[instrument(skip(self, request), fields(start_line = request.start_line, mode = %request.mode))]
    pub async fn edit_lines(&self, request: &EditRequest) -> Result<String, BridgeError> {
        let editor = self.editor().await?;
        let line_count = editor.line_count().await?;

        let edit = plan_edit(request, line_count)?;
        let inserted = edit.replacement.len();

        editor
            .set_lines(edit.start, edit.end, edit.replacement)
            .await?;

        let message = describe_edit(request, inserted, line_count);
        info!("✏️  {}", message);
        Ok(message)
    }
}

#[cfg(test)]
#[path = "editor_bridge_test.rs"]
mod editor_bridge_test;
