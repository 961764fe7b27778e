//! Structured Edit Requests
//!
//! Agent-facing edit model: a 1-based start line, an edit mode, and a text
//! payload. The bridge translates these into a single Neovim line-range
//! replacement (see `services::editor_bridge`).
//!
//! # Payload Normalization
//!
//! - Lines are split on `\n`; a trailing `\r` on each segment is dropped so
//!   `\r\n` payloads behave like `\n` payloads
//! - A single trailing line terminator ends the last line, it does not add an
//!   extra empty line (`"a\n"` is one line, `"a\n\n"` is two)
//! - The empty payload is zero lines

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// How the payload is applied at the start line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Splice before the start line, shifting existing lines down
    Insert,
    /// Replace everything from the start line through the last line
    Replace,
}

impl EditMode {
    /// Valid 1-based start lines for a buffer whose last line is `last_line`
    ///
    /// Insert accepts one past the end (append); replace must address an
    /// existing line.
    pub fn valid_start_lines(&self, last_line: i64) -> RangeInclusive<i64> {
        match self {
            Self::Insert => 1..=last_line + 1,
            Self::Replace => 1..=last_line,
        }
    }
}

impl FromStr for EditMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(Self::Insert),
            "replace" => Ok(Self::Replace),
            _ => Err(format!("Invalid edit mode: {} (expected insert or replace)", s)),
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => write!(f, "insert"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// A line-addressed edit as sent by the agent
///
/// `start_line` is signed so that `0` and negative values reach range
/// validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub start_line: i64,
    pub mode: EditMode,
    pub lines: String,
}

impl EditRequest {
    pub fn new(start_line: i64, mode: EditMode, lines: impl Into<String>) -> Self {
        Self {
            start_line,
            mode,
            lines: lines.into(),
        }
    }

    /// Payload split into individual lines
    pub fn payload_lines(&self) -> Vec<String> {
        split_payload(&self.lines)
    }
}

/// Split a text payload into lines using the normalization rules above
pub fn split_payload(payload: &str) -> Vec<String> {
    if payload.is_empty() {
        return Vec::new();
    }

    let body = payload
        .strip_suffix('\n')
        .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
        .unwrap_or(payload);

    body.split('\n')
        .map(|segment| segment.strip_suffix('\r').unwrap_or(segment).to_string())
        .collect()
}

#[cfg(test)]
#[path = "edit_test.rs"]
mod edit_test;
