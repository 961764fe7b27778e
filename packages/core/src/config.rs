//! Bridge configuration
//!
//! Where to find the editor and what to do when it is not there. Built once at
//! process start, from the environment and then CLI overrides in the binary,
//! and never reloaded.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Socket Neovim listens on when started with `nvim --listen /tmp/nvim`
pub const DEFAULT_SOCKET_PATH: &str = "/tmp/nvim";

/// Environment variables checked for the editor address, in priority order
///
/// `NVIM` is exported by Neovim itself to jobs and terminals it starts.
pub const ADDRESS_ENV_VARS: &[&str] = &["NVIM_SOCKET_PATH", "NVIM", "NVIM_LISTEN_ADDRESS"];

/// Enables spawning an embedded editor when dialing fails
pub const EMBED_FALLBACK_ENV_VAR: &str = "NVIM_MCP_EMBED";

/// Editor connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Explicit socket path or `host:port`; `None` means use the default
    pub socket_address: Option<String>,

    /// Spawn `nvim --embed` when the address cannot be dialed
    pub embed_fallback: bool,

    /// Neovim executable used for the embedded fallback
    pub nvim_binary: PathBuf,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            socket_address: None,
            embed_fallback: false,
            nvim_binary: PathBuf::from("nvim"),
        }
    }
}

impl BridgeConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let socket_address = ADDRESS_ENV_VARS
            .iter()
            .filter_map(|&key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        let embed_fallback = lookup(EMBED_FALLBACK_ENV_VAR)
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            socket_address,
            embed_fallback,
            ..Self::default()
        }
    }

    /// Address to dial: the configured one or [`DEFAULT_SOCKET_PATH`]
    pub fn resolved_address(&self) -> &str {
        self.socket_address.as_deref().unwrap_or(DEFAULT_SOCKET_PATH)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(address) = &self.socket_address {
            if address.trim().is_empty() {
                return Err("socket_address cannot be empty".to_string());
            }
        }

        if self.nvim_binary.as_os_str().is_empty() {
            return Err("nvim_binary cannot be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BridgeConfig::default();
        assert_eq!(config.resolved_address(), DEFAULT_SOCKET_PATH);
        assert!(!config.embed_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socket_path_env_takes_priority() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            ("NVIM", "/run/user/1000/nvim.1234.0"),
            ("NVIM_SOCKET_PATH", "/tmp/custom.sock"),
        ]));
        assert_eq!(config.resolved_address(), "/tmp/custom.sock");
    }

    #[test]
    fn test_blank_env_values_are_skipped() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            ("NVIM_SOCKET_PATH", "  "),
            ("NVIM_LISTEN_ADDRESS", "127.0.0.1:6666"),
        ]));
        assert_eq!(config.resolved_address(), "127.0.0.1:6666");
    }

    #[test]
    fn test_embed_fallback_flag() {
        let on = BridgeConfig::from_lookup(lookup_from(&[("NVIM_MCP_EMBED", "true")]));
        let off = BridgeConfig::from_lookup(lookup_from(&[("NVIM_MCP_EMBED", "0")]));
        assert!(on.embed_fallback);
        assert!(!off.embed_fallback);
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let config = BridgeConfig {
            socket_address: Some(String::new()),
            ..BridgeConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BridgeConfig {
            nvim_binary: PathBuf::new(),
            ..BridgeConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
