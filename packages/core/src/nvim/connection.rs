//! Editor connection manager
//!
//! Holds the one handle to the editor for the life of the process. The handle
//! is dialed lazily on the first `get()`; concurrent first calls share the same
//! attempt, and every later call reuses the established handle. A failed
//! attempt is not remembered, so the next request dials again.
//!
//! The manager is an ordinary value built in `main` and owned by the bridge;
//! there is no process-global state.

use crate::config::BridgeConfig;
use crate::nvim::rpc_editor::{NotificationHandler, RpcEditor};
use crate::nvim::{EditorApi, EditorError};
use nvim_rs::create::tokio as create;
use std::fmt;
use std::sync::Arc;
use tokio::process::Command;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

/// Where the editor's control channel lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NvimAddress {
    /// `host:port`
    Tcp(String),
    /// Unix socket or Windows named pipe
    Path(String),
}

impl NvimAddress {
    /// Classify an address string
    ///
    /// Anything without path separators that ends in `:<port>` is TCP.
    pub fn parse(address: &str) -> Self {
        let has_separator = address.contains('/') || address.contains('\\');
        let is_tcp = !has_separator
            && address
                .rsplit_once(':')
                .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
                .unwrap_or(false);

        if is_tcp {
            Self::Tcp(address.to_string())
        } else {
            Self::Path(address.to_string())
        }
    }
}

impl fmt::Display for NvimAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp(addr) => write!(f, "tcp://{}", addr),
            Self::Path(path) => write!(f, "{}", path),
        }
    }
}

/// Lazily established, process-lifetime editor handle
pub struct EditorConnection {
    config: BridgeConfig,
    editor: OnceCell<Arc<dyn EditorApi>>,
}

impl EditorConnection {
    /// Connection that dials according to `config` on first use
    pub fn new(config: BridgeConfig) -> Self {
        Self {
            config,
            editor: OnceCell::new(),
        }
    }

    /// Connection around an already established editor
    pub fn with_editor(editor: Arc<dyn EditorApi>) -> Self {
        Self {
            config: BridgeConfig::default(),
            editor: OnceCell::from(editor),
        }
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Whether a handle has been established
    pub fn is_connected(&self) -> bool {
        self.editor.initialized()
    }

    /// Shared editor handle, dialing on first call
    pub async fn get(&self) -> Result<Arc<dyn EditorApi>, EditorError> {
        let editor = self.editor.get_or_try_init(|| self.establish()).await?;
        Ok(Arc::clone(editor))
    }

    #[instrument(skip(self), fields(address = %self.config.resolved_address()))]
    async fn establish(&self) -> Result<Arc<dyn EditorApi>, EditorError> {
        let address = NvimAddress::parse(self.config.resolved_address());

        match dial(&address).await {
            Ok(editor) => {
                info!("🔗 Connected to Neovim at {}", address);
                Ok(editor)
            }
            Err(e) if self.config.embed_fallback => {
                warn!(
                    "⚠️  Could not reach Neovim at {} ({}), spawning embedded instance",
                    address, e
                );
                spawn_embedded(&self.config).await
            }
            Err(e) => Err(e),
        }
    }
}

async fn dial(address: &NvimAddress) -> Result<Arc<dyn EditorApi>, EditorError> {
    match address {
        NvimAddress::Tcp(addr) => {
            let (neovim, io_handle) = create::new_tcp(addr.as_str(), NotificationHandler::new())
                .await
                .map_err(|e| EditorError::connection_failed(address.to_string(), e))?;
            Ok(Arc::new(RpcEditor::new(neovim, io_handle, None)))
        }
        NvimAddress::Path(path) => {
            let (neovim, io_handle) = create::new_path(path.as_str(), NotificationHandler::new())
                .await
                .map_err(|e| EditorError::connection_failed(address.to_string(), e))?;
            Ok(Arc::new(RpcEditor::new(neovim, io_handle, None)))
        }
    }
}

async fn spawn_embedded(config: &BridgeConfig) -> Result<Arc<dyn EditorApi>, EditorError> {
    let binary = config.nvim_binary.display().to_string();

    let mut cmd = Command::new(&config.nvim_binary);
    cmd.arg("--embed").arg("--headless").kill_on_drop(true);

    let (neovim, io_handle, child) = create::new_child_cmd(&mut cmd, NotificationHandler::new())
        .await
        .map_err(|e| EditorError::spawn_failed(&binary, e))?;

    info!("🚀 Spawned embedded Neovim ({})", binary);
    Ok(Arc::new(RpcEditor::new(neovim, io_handle, Some(child))))
}
