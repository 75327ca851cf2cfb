//! Runtime settings
//!
//! Read from the environment (a `.env` file is honoured by the binary):
//!   FANVIL_CFG_DIR        — directory holding the config files (default: configs)
//!   FANVIL_CFG_BIND_ADDR  — listen address (default: 0.0.0.0:8000)
//!   FANVIL_CFG_EXTENSION  — extension of listed files (default: .cfg)

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::storage::DEFAULT_EXTENSION;

pub const DEFAULT_CONFIG_DIR: &str = "configs";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub extension: String,
}

impl Settings {
    /// Create from FANVIL_CFG_* environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config_dir = lookup("FANVIL_CFG_DIR").unwrap_or_else(|| DEFAULT_CONFIG_DIR.into());
        let bind_addr = lookup("FANVIL_CFG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("FANVIL_CFG_BIND_ADDR is not a socket address: {bind_addr}"))?;
        let extension = lookup("FANVIL_CFG_EXTENSION").unwrap_or_else(|| DEFAULT_EXTENSION.into());

        Ok(Self {
            config_dir: config_dir.into(),
            bind_addr,
            extension,
        })
    }
}
