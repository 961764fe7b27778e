//! Service Layer Error Types
//!
//! The three failure kinds the bridge reports. Every editor failure is mapped
//! to exactly one of them; nothing is swallowed or replaced by a default.

use crate::models::EditMode;
use crate::nvim::EditorError;
use thiserror::Error;

/// Editor bridge errors
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Editor channel unreachable or broken
    #[error("Neovim connection error: {0}")]
    Connection(String),

    /// Start line outside the span the mode allows; raised before any mutation
    #[error(
        "Invalid start line {start_line} for {mode}: buffer has {last_line} lines \
         (valid range 1..={max_start})"
    )]
    InvalidRange {
        start_line: i64,
        mode: EditMode,
        last_line: i64,
        max_start: i64,
    },

    /// Neovim rejected raw input; message passed through unmodified
    #[error("{0}")]
    EditorRejectedInput(String),
}

impl BridgeError {
    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create an invalid range error for `mode` against a buffer of `last_line` lines
    pub fn invalid_range(start_line: i64, mode: EditMode, last_line: i64) -> Self {
        Self::InvalidRange {
            start_line,
            mode,
            last_line,
            max_start: *mode.valid_start_lines(last_line).end(),
        }
    }
}

impl From<EditorError> for BridgeError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Rejected(message) => Self::EditorRejectedInput(message),
            other => Self::Connection(other.to_string()),
        }
    }
}
