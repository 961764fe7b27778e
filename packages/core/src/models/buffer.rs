//! Buffer Snapshot Model
//!
//! A point-in-time copy of the active buffer, addressed by 1-based line numbers.
//!
//! # Invariants
//!
//! - Line numbers are contiguous starting at 1 (no gaps)
//! - A snapshot always holds at least one line: an empty buffer is a single
//!   empty line, matching Neovim's own convention
//! - Snapshots are never cached; every read builds a new one from the editor
//!
//! # Examples
//!
//! ```rust
//! use neovim_mcp_core::models::BufferSnapshot;
//!
//! let snapshot = BufferSnapshot::from_lines(vec!["fn main() {".into(), "}".into()]);
//! assert_eq!(snapshot.last_line(), 2);
//! assert_eq!(snapshot.line(1), Some("fn main() {"));
//! assert_eq!(snapshot.render(), "1: fn main() {\n2: }");
//! ```

use serde::Serialize;
use std::fmt;

/// Ordered view of the active buffer keyed by 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BufferSnapshot {
    lines: Vec<String>,
}

impl BufferSnapshot {
    /// Build a snapshot from the editor's raw line list
    ///
    /// An empty list is normalized to a single empty line.
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            return Self {
                lines: vec![String::new()],
            };
        }
        Self { lines }
    }

    /// Number of the last line (equals the line count, never 0)
    pub fn last_line(&self) -> usize {
        self.lines.len()
    }

    /// Text of a 1-based line, if it exists
    pub fn line(&self, line_number: usize) -> Option<&str> {
        line_number
            .checked_sub(1)
            .and_then(|idx| self.lines.get(idx))
            .map(String::as_str)
    }

    /// Iterate `(line_number, text)` pairs in buffer order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.as_str()))
    }

    /// Raw lines without numbering
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render as newline-joined `"N: text"` pairs
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BufferSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (number, text) in self.iter() {
            if number > 1 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", number, text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "buffer_test.rs"]
mod buffer_test;
