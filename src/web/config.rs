//! Server configuration.

use anyhow::{Context, Result};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::data::DATASET_PATH;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 8501;

#[derive(Clone, Debug)]
pub struct ServeConfig {
    pub addr: SocketAddr,
    pub dataset_path: PathBuf,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
            dataset_path: PathBuf::from(DATASET_PATH),
        }
    }

    /// Bind address from `HOST` / `PORT`, falling back to `127.0.0.1:8501`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::var("HOST").ok(), std::env::var("PORT").ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self> {
        let host = match host.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
            Some(raw) => raw
                .parse::<IpAddr>()
                .with_context(|| format!("invalid HOST '{raw}'"))?,
            None => DEFAULT_HOST,
        };
        let port = match port.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT '{raw}'"))?,
            None => DEFAULT_PORT,
        };
        Ok(Self::new(host, port))
    }

    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }
}
