//! Neovim MCP Server
//!
//! Standalone MCP (Model Context Protocol) server that lets an AI agent read
//! and edit the buffer of a running Neovim instance.
//!
//! Architecture:
//!   AI Agent → stdio (JSON-RPC) → neovim-mcp → msgpack-RPC → Neovim
//!
//! stdout carries protocol traffic only; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Start Neovim listening on the default socket
//! nvim --listen /tmp/nvim
//!
//! # Point the server at it (or at host:port for TCP)
//! neovim-mcp --socket /tmp/nvim
//!
//! # No editor running? Spawn a headless one instead
//! neovim-mcp --embed
//! ```
//!
//! # Address Configuration
//!
//! `--socket` wins; otherwise `NVIM_SOCKET_PATH`, `NVIM` and
//! `NVIM_LISTEN_ADDRESS` are checked in that order before falling back to
//! `/tmp/nvim`.

use clap::Parser;
use neovim_mcp_core::{mcp::run_mcp_server, BridgeConfig, EditorBridge, EditorConnection};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "neovim_mcp=info,neovim_mcp_core=info";

#[derive(Debug, Parser)]
#[command(name = "neovim-mcp", version, about)]
struct Args {
    /// Neovim socket path or host:port
    #[arg(long, short = 's')]
    socket: Option<String>,

    /// Spawn `nvim --embed` when the address cannot be dialed
    #[arg(long)]
    embed: bool,

    /// Neovim executable used with --embed
    #[arg(long, value_name = "PATH")]
    nvim_bin: Option<PathBuf>,

    /// tracing filter directives
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

impl Args {
    fn into_config(self) -> BridgeConfig {
        let mut config = BridgeConfig::from_env();
        if let Some(socket) = self.socket {
            config.socket_address = Some(socket);
        }
        if self.embed {
            config.embed_fallback = true;
        }
        if let Some(binary) = self.nvim_bin {
            config.nvim_binary = binary;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_filter))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = args.into_config();
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    info!(
        "🔧 neovim-mcp {} (editor address: {}, embed fallback: {})",
        env!("CARGO_PKG_VERSION"),
        config.resolved_address(),
        config.embed_fallback
    );

    // Dialed lazily on the first tool call
    let bridge = Arc::new(EditorBridge::new(EditorConnection::new(config)));

    run_mcp_server(bridge).await
}
