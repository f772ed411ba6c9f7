//! Configuration management module.
//!
//! Holds the connection settings a facade is built from. Loading from the
//! environment is opt-in; nothing here runs unless the caller asks for it.

use std::{env, time::Duration};

use crate::error::AppError;

/// Connect timeout applied when none is given.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Connection configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint URL (http, https, ws or wss).
    ///
    /// WebSocket URLs need [`RpcFacade::connect`](crate::RpcFacade::connect).
    pub rpc_url: String,
    /// Timeout in milliseconds (default: 10000).
    pub timeout_ms: u64,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Create a configuration for `rpc_url` with the default timeout.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self { rpc_url: rpc_url.into(), timeout_ms: DEFAULT_TIMEOUT_MS, log_level: "info".into() }
    }

    /// Override the timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ETHEREUM_RPC_URL`: Ethereum JSON-RPC endpoint
    ///
    /// Optional environment variables:
    /// - `ETHEREUM_RPC_TIMEOUT_MS`: timeout in milliseconds (default: 10000)
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let rpc_url = env::var("ETHEREUM_RPC_URL").map_err(|_| {
            AppError::Config("ETHEREUM_RPC_URL environment variable not set".into())
        })?;

        let timeout_ms = match env::var("ETHEREUM_RPC_TIMEOUT_MS") {
            Ok(raw) => raw.trim().parse::<u64>()?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self { rpc_url, timeout_ms, log_level })
    }
}
