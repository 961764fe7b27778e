//! Neovim msgpack-RPC editor
//!
//! [`EditorApi`] on top of an `nvim-rs` session. Works with any transport the
//! session was created over (unix socket, TCP, embedded child stdio).

use crate::models::{CursorPosition, EditorMode, FileInfo, SplitKind, WindowLayout};
use crate::nvim::{EditorApi, EditorError};
use async_trait::async_trait;
use futures::io::AsyncWrite;
use nvim_rs::error::LoopError;
use nvim_rs::{Handler, Neovim};
use rmpv::Value;
use std::marker::PhantomData;
use std::sync::Mutex;
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::debug;

const FILE_INFO_EXPR: &str = "{'modified': &modified, 'modifiable': &modifiable, \
     'readonly': &readonly, 'filetype': &filetype, \
     'size': max([0, line2byte(line('$') + 1) - 1])}";

// Not a fast request: Neovim answers it only after pending typeahead has run
const INPUT_BARRIER_EXPR: &str = "1";

const WINDOW_LAYOUT_EXPR: &str = "{'count': winnr('$'), 'width': winwidth(0), \
     'height': winheight(0), 'split': winlayout()[0]}";

/// Handler for notifications Neovim pushes over the channel
///
/// The bridge never subscribes to events, so notifications are only logged.
pub struct NotificationHandler<W> {
    _writer: PhantomData<fn() -> W>,
}

impl<W> NotificationHandler<W> {
    pub fn new() -> Self {
        Self {
            _writer: PhantomData,
        }
    }
}

impl<W> Default for NotificationHandler<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> Clone for NotificationHandler<W> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

#[async_trait]
impl<W> Handler for NotificationHandler<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    type Writer = W;

    async fn handle_notify(&self, name: String, _args: Vec<Value>, _neovim: Neovim<W>) {
        debug!("🔔 Ignoring Neovim notification: {}", name);
    }
}

/// Live Neovim session
pub struct RpcEditor<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    neovim: Neovim<W>,
    io_handle: JoinHandle<Result<(), Box<LoopError>>>,
    // Embedded child, killed when the editor is dropped
    _child: Mutex<Option<Child>>,
}

impl<W> RpcEditor<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    pub fn new(
        neovim: Neovim<W>,
        io_handle: JoinHandle<Result<(), Box<LoopError>>>,
        child: Option<Child>,
    ) -> Self {
        Self {
            neovim,
            io_handle,
            _child: Mutex::new(child),
        }
    }

    /// Fail fast once the RPC loop has exited instead of waiting on a dead channel
    fn ensure_open(&self) -> Result<(), EditorError> {
        if self.io_handle.is_finished() {
            return Err(EditorError::channel("connection to Neovim closed"));
        }
        Ok(())
    }

    async fn eval_map(&self, expr: &str) -> Result<Vec<(Value, Value)>, EditorError> {
        match self.neovim.eval(expr).await? {
            Value::Map(entries) => Ok(entries),
            other => Err(EditorError::channel(format!(
                "expected a dictionary from `{}`, got {}",
                expr, other
            ))),
        }
    }
}

impl<W> Drop for RpcEditor<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    fn drop(&mut self) {
        self.io_handle.abort();
    }
}

/// Look up a string key in a msgpack map
fn map_get<'a>(entries: &'a [(Value, Value)], key: &str) -> Option<&'a Value> {
    entries
        .iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

fn map_i64(entries: &[(Value, Value)], key: &str) -> Result<i64, EditorError> {
    map_get(entries, key)
        .and_then(Value::as_i64)
        .ok_or_else(|| EditorError::channel(format!("missing integer field '{}'", key)))
}

/// Vim options come back as integers (`&modified`) or booleans depending on version
fn map_flag(entries: &[(Value, Value)], key: &str) -> Result<bool, EditorError> {
    match map_get(entries, key) {
        Some(Value::Boolean(flag)) => Ok(*flag),
        Some(value) => value
            .as_i64()
            .map(|n| n != 0)
            .ok_or_else(|| EditorError::channel(format!("field '{}' is not a flag", key))),
        None => Err(EditorError::channel(format!("missing flag '{}'", key))),
    }
}

fn map_string(entries: &[(Value, Value)], key: &str) -> Result<String, EditorError> {
    map_get(entries, key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| EditorError::channel(format!("missing string field '{}'", key)))
}

/// `nvim_input` reports how many bytes it queued; anything short is dropped input
fn check_input_accepted(written: i64, keys: &str) -> Result<(), EditorError> {
    if usize::try_from(written).ok() == Some(keys.len()) {
        return Ok(());
    }
    Err(EditorError::rejected(format!(
        "Neovim accepted only {} of {} input bytes",
        written,
        keys.len()
    )))
}

fn decode_window_count(count: i64) -> Result<usize, EditorError> {
    usize::try_from(count)
        .map_err(|_| EditorError::channel(format!("invalid window count {}", count)))
}

/// Parse the `nvim_get_mode` result
pub(crate) fn parse_mode(entries: &[(Value, Value)]) -> Result<EditorMode, EditorError> {
    let code = map_string(entries, "mode")?;
    let blocking = map_get(entries, "blocking")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(EditorMode::new(code, blocking))
}

#[async_trait]
impl<W> EditorApi for RpcEditor<W>
where
    W: AsyncWrite + Send + Unpin + 'static,
{
    async fn line_count(&self) -> Result<i64, EditorError> {
        self.ensure_open()?;
        let buffer = self.neovim.get_current_buf().await?;
        Ok(buffer.line_count().await?)
    }

    async fn get_lines(&self, start: i64, end: i64) -> Result<Vec<String>, EditorError> {
        self.ensure_open()?;
        let buffer = self.neovim.get_current_buf().await?;
        Ok(buffer.get_lines(start, end, true).await?)
    }

    async fn set_lines(
        &self,
        start: i64,
        end: i64,
        replacement: Vec<String>,
    ) -> Result<(), EditorError> {
        self.ensure_open()?;
        let buffer = self.neovim.get_current_buf().await?;
        buffer.set_lines(start, end, true, replacement).await?;
        Ok(())
    }

    async fn feed_input(&self, keys: &str) -> Result<(), EditorError> {
        self.ensure_open()?;
        let written = self.neovim.input(keys).await?;
        check_input_accepted(written, keys)?;

        self.neovim.eval(INPUT_BARRIER_EXPR).await?;
        debug!("⌨️  Neovim processed {} input bytes", written);
        Ok(())
    }

    async fn mode(&self) -> Result<EditorMode, EditorError> {
        self.ensure_open()?;
        let entries = self.neovim.get_mode().await?;
        parse_mode(&entries)
    }

    async fn cursor(&self) -> Result<CursorPosition, EditorError> {
        self.ensure_open()?;
        let window = self.neovim.get_current_win().await?;
        let (row, col) = window.get_cursor().await?;
        Ok(CursorPosition::from_nvim(row, col))
    }

    async fn file_info(&self) -> Result<FileInfo, EditorError> {
        self.ensure_open()?;
        let buffer = self.neovim.get_current_buf().await?;
        let filename = buffer.get_name().await?;
        let line_count = buffer.line_count().await?;
        let entries = self.eval_map(FILE_INFO_EXPR).await?;

        Ok(FileInfo {
            filename,
            line_count,
            size_bytes: map_i64(&entries, "size")?,
            modified: map_flag(&entries, "modified")?,
            modifiable: map_flag(&entries, "modifiable")?,
            readonly: map_flag(&entries, "readonly")?,
            filetype: map_string(&entries, "filetype")?,
        })
    }

    async fn window_layout(&self) -> Result<WindowLayout, EditorError> {
        self.ensure_open()?;
        let entries = self.eval_map(WINDOW_LAYOUT_EXPR).await?;
        let tag = map_string(&entries, "split")?;
        let split = SplitKind::from_layout_tag(&tag)
            .ok_or_else(|| EditorError::channel(format!("unknown window layout '{}'", tag)))?;
        let count = map_i64(&entries, "count")?;

        Ok(WindowLayout {
            window_count: decode_window_count(count)?,
            width: map_i64(&entries, "width")?,
            height: map_i64(&entries, "height")?,
            split,
        })
    }

    async fn cwd(&self) -> Result<String, EditorError> {
        self.ensure_open()?;
        match self.neovim.call_function("getcwd", vec![]).await? {
            Value::String(cwd) => cwd
                .into_str()
                .ok_or_else(|| EditorError::channel("working directory is not valid UTF-8")),
            other => Err(EditorError::channel(format!(
                "expected a string from getcwd(), got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: Value) -> (Value, Value) {
        (Value::from(key), value)
    }

    #[test]
    fn test_parse_mode() {
        let entries = vec![
            entry("mode", Value::from("i")),
            entry("blocking", Value::from(false)),
        ];
        let mode = parse_mode(&entries).unwrap();
        assert_eq!(mode.code, "i");
        assert_eq!(mode.name, "insert");
        assert!(!mode.blocking);
    }

    #[test]
    fn test_parse_mode_missing_code() {
        let entries = vec![entry("blocking", Value::from(true))];
        assert!(matches!(parse_mode(&entries), Err(EditorError::Channel(_))));
    }

    #[test]
    fn test_partial_input_is_rejected() {
        assert!(check_input_accepted(5, "hello").is_ok());
        assert!(check_input_accepted(0, "").is_ok());

        let err = check_input_accepted(3, "hello").unwrap_err();
        assert!(matches!(err, EditorError::Rejected(_)));
        assert!(err.to_string().contains("3 of 5"));
    }

    #[test]
    fn test_window_count_must_be_non_negative() {
        assert_eq!(decode_window_count(2).unwrap(), 2);
        assert!(matches!(
            decode_window_count(-1),
            Err(EditorError::Channel(_))
        ));
    }

    #[test]
    fn test_map_flag_accepts_integers_and_booleans() {
        let entries = vec![
            entry("modified", Value::from(1)),
            entry("readonly", Value::from(false)),
            entry("filetype", Value::from("rust")),
        ];
        assert!(map_flag(&entries, "modified").unwrap());
        assert!(!map_flag(&entries, "readonly").unwrap());
        assert!(map_flag(&entries, "filetype").is_err());
        assert!(map_flag(&entries, "modifiable").is_err());
    }
}
