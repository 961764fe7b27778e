//! Editor Layer
//!
//! Everything that talks to Neovim:
//!
//! - [`EditorApi`] - the primitives the bridge consumes
//! - [`RpcEditor`] - msgpack-RPC implementation over `nvim-rs`
//! - [`EditorConnection`] - lazily dialed, process-lifetime handle
//! - [`InMemoryEditor`] - line-vector implementation for tests
//!
//! # Architecture
//!
//! The bridge only ever sees `Arc<dyn EditorApi>`, so the transport (unix
//! socket, TCP, embedded child) is decided once when the connection is
//! established and is invisible above this layer.

mod connection;
mod editor_api;
mod error;
mod memory_editor;
mod rpc_editor;

pub use connection::{EditorConnection, NvimAddress};
pub use editor_api::EditorApi;
pub use error::EditorError;
pub use memory_editor::InMemoryEditor;
pub use rpc_editor::{NotificationHandler, RpcEditor};
