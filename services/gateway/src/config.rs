use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub log_level: String,
    /// Packages placed in the pool at startup.
    pub seed_packages: usize,
    /// How often the notice sweeper checks for expired notices.
    pub sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let listen_addr = std::env::var("SHIPDECK_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()?;

        let log_level = std::env::var("SHIPDECK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let seed_packages = std::env::var("SHIPDECK_SEED_PACKAGES")
            .map(|v| v.parse())
            .unwrap_or(Ok(2))?;

        let sweep_interval_ms = std::env::var("SHIPDECK_SWEEP_INTERVAL_MS")
            .map(|v| v.parse())
            .unwrap_or(Ok(500))?;

        Ok(Self {
            listen_addr,
            log_level,
            seed_packages,
            sweep_interval: Duration::from_millis(sweep_interval_ms),
        })
    }
}
