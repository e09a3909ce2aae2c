use std::env;
use std::path::PathBuf;
use anyhow::{Context, Result};

/// `DATA_FILE` value that keeps the document in memory instead of on disk.
pub const IN_MEMORY_DATA_FILE: &str = ":memory:";

#[derive(Debug, Clone)]
pub struct Config {
    pub service_port: u16,
    pub service_host: String,
    pub data_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here with the process environment; tests pass a
    /// closure over a fixed table instead of mutating global state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let data_file = lookup("DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data.json"));

        Ok(Config {
            service_port,
            service_host,
            data_file,
        })
    }

    pub fn in_memory(&self) -> bool {
        self.data_file.as_os_str() == IN_MEMORY_DATA_FILE
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Data file: {}", self.data_file.display());
        tracing::info!("  Service listening on: {}", self.bind_addr());
    }
}
