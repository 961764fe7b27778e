//! Editor Error Types
//!
//! Errors raised by the editor layer: dialing the control channel, spawning
//! an embedded editor, and individual RPC calls.

use thiserror::Error;

/// Editor channel and RPC errors
#[derive(Error, Debug)]
pub enum EditorError {
    /// Failed to dial the editor's control socket
    #[error("Failed to connect to Neovim at {address}: {source}")]
    ConnectionFailed {
        address: String,
        source: std::io::Error,
    },

    /// Failed to spawn an embedded editor
    #[error("Failed to spawn embedded Neovim ({binary}): {source}")]
    SpawnFailed {
        binary: String,
        source: std::io::Error,
    },

    /// The channel broke or returned something undecodable
    #[error("Neovim RPC channel error: {0}")]
    Channel(String),

    /// Neovim executed the call and reported an error
    #[error("{0}")]
    Rejected(String),
}

impl EditorError {
    /// Create a connection failed error
    pub fn connection_failed(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConnectionFailed {
            address: address.into(),
            source,
        }
    }

    /// Create a spawn failed error
    pub fn spawn_failed(binary: impl Into<String>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            binary: binary.into(),
            source,
        }
    }

    /// Create a channel error
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a rejected error
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected(msg.into())
    }
}

impl From<Box<nvim_rs::error::CallError>> for EditorError {
    fn from(err: Box<nvim_rs::error::CallError>) -> Self {
        match *err {
            nvim_rs::error::CallError::NeovimError(_, message) => Self::Rejected(message),
            other => Self::Channel(other.to_string()),
        }
    }
}
