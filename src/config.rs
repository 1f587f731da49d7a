use crate::tmdb::TMDB_BASE;
use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use tracing::info;

const DEFAULT_BIND: &str = "0.0.0.0:3146";

#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub bind: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("TMDB_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Missing required environment variable: TMDB_API_KEY"))?;
        let base_url = lookup("TMDB_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| TMDB_BASE.to_string());
        let bind_raw = lookup("MARQUEE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse()
            .with_context(|| format!("MARQUEE_BIND is not a socket address: {}", bind_raw))?;
        info!("Using TMDB at {}", base_url);
        Ok(Self {
            api_key,
            base_url,
            bind,
        })
    }
}

// Keeps the credential out of logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("bind", &self.bind)
            .finish()
    }
}
