//! Editor Status Model
//!
//! Structures merged into a [`StatusReport`] by the status reporter. Each piece
//! comes from an independent editor query; a report is only built when every
//! query succeeded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modal state as reported by `nvim_get_mode`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorMode {
    /// Raw mode code (`n`, `i`, `v`, `no`, `ic`, ...)
    pub code: String,
    /// Readable name derived from the code
    pub name: String,
    /// Whether Neovim is waiting for input (e.g. pending operator)
    pub blocking: bool,
}

impl EditorMode {
    pub fn new(code: impl Into<String>, blocking: bool) -> Self {
        let code = code.into();
        let name = mode_name(&code).to_string();
        Self {
            code,
            name,
            blocking,
        }
    }

    pub fn normal() -> Self {
        Self::new("n", false)
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Map a Neovim mode code to its readable name
pub fn mode_name(code: &str) -> &'static str {
    if code.starts_with("no") {
        return "operator-pending";
    }
    match code {
        "V" => "visual line",
        "\u{16}" => "visual block",
        "S" => "select line",
        "\u{13}" => "select block",
        "Rv" | "Rvc" | "Rvx" => "virtual replace",
        "cv" | "cvr" => "ex",
        "rm" => "more prompt",
        "r?" => "confirm",
        _ => match code.chars().next() {
            Some('n') => "normal",
            Some('v') => "visual",
            Some('s') => "select",
            Some('i') => "insert",
            Some('R') => "replace",
            Some('c') => "command-line",
            Some('r') => "hit-enter prompt",
            Some('!') => "shell",
            Some('t') => "terminal",
            _ => "unknown",
        },
    }
}

/// Cursor position, 1-based in both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub line: i64,
    pub column: i64,
}

impl CursorPosition {
    /// Convert Neovim's `(row, col)` pair (1-based row, 0-based byte column)
    pub fn from_nvim(row: i64, col: i64) -> Self {
        Self {
            line: row,
            column: col + 1,
        }
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Metadata about the active buffer's file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    /// Full path of the buffer's file, empty for unnamed buffers
    pub filename: String,
    pub line_count: i64,
    /// Buffer size in bytes including line terminators
    pub size_bytes: i64,
    /// Dirty flag (`&modified`)
    pub modified: bool,
    pub modifiable: bool,
    pub readonly: bool,
    pub filetype: String,
}

/// Top-level split of the current tab page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    /// Single window
    Leaf,
    /// Side-by-side windows
    Row,
    /// Stacked windows
    Col,
}

impl SplitKind {
    /// Parse the first element of `winlayout()`
    pub fn from_layout_tag(tag: &str) -> Option<Self> {
        match tag {
            "leaf" => Some(Self::Leaf),
            "row" => Some(Self::Row),
            "col" => Some(Self::Col),
            _ => None,
        }
    }
}

/// Window dimensions and split arrangement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowLayout {
    pub window_count: usize,
    /// Width of the current window in columns
    pub width: i64,
    /// Height of the current window in rows
    pub height: i64,
    pub split: SplitKind,
}

/// Everything the agent needs to know about the editor in one structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub mode: EditorMode,
    pub filename: String,
    pub cursor: CursorPosition,
    pub file_info: FileInfo,
    pub window_layout: WindowLayout,
    pub cwd: String,
}

/// Mode and cursor as two lines, reported after raw commands
pub fn mode_cursor_summary(mode: &EditorMode, cursor: &CursorPosition) -> String {
    format!("Mode: {}\nCursor: {}", mode, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names() {
        assert_eq!(mode_name("n"), "normal");
        assert_eq!(mode_name("niI"), "normal");
        assert_eq!(mode_name("no"), "operator-pending");
        assert_eq!(mode_name("nov"), "operator-pending");
        assert_eq!(mode_name("i"), "insert");
        assert_eq!(mode_name("ic"), "insert");
        assert_eq!(mode_name("v"), "visual");
        assert_eq!(mode_name("V"), "visual line");
        assert_eq!(mode_name("\u{16}"), "visual block");
        assert_eq!(mode_name("R"), "replace");
        assert_eq!(mode_name("Rv"), "virtual replace");
        assert_eq!(mode_name("c"), "command-line");
        assert_eq!(mode_name("t"), "terminal");
        assert_eq!(mode_name("?"), "unknown");
    }

    #[test]
    fn test_cursor_from_nvim_makes_column_one_based() {
        let cursor = CursorPosition::from_nvim(3, 0);
        assert_eq!(cursor, CursorPosition { line: 3, column: 1 });
        assert_eq!(cursor.to_string(), "3:1");
    }

    #[test]
    fn test_status_report_serializes_camel_case() {
        let report = StatusReport {
            mode: EditorMode::normal(),
            filename: "/tmp/main.rs".to_string(),
            cursor: CursorPosition { line: 1, column: 1 },
            file_info: FileInfo {
                filename: "/tmp/main.rs".to_string(),
                line_count: 2,
                size_bytes: 14,
                modified: true,
                modifiable: true,
                readonly: false,
                filetype: "rust".to_string(),
            },
            window_layout: WindowLayout {
                window_count: 2,
                width: 80,
                height: 24,
                split: SplitKind::Row,
            },
            cwd: "/tmp".to_string(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["mode"]["code"], "n");
        assert_eq!(value["mode"]["name"], "normal");
        assert_eq!(value["fileInfo"]["lineCount"], 2);
        assert_eq!(value["fileInfo"]["modified"], true);
        assert_eq!(value["windowLayout"]["windowCount"], 2);
        assert_eq!(value["windowLayout"]["split"], "row");
    }

    #[test]
    fn test_mode_cursor_summary() {
        let summary = mode_cursor_summary(
            &EditorMode::new("i", false),
            &CursorPosition { line: 4, column: 7 },
        );
        assert_eq!(summary, "Mode: insert (i)\nCursor: 4:7");
    }
}
