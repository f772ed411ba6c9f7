//! Error types and handling module.
//!
//! Defines the crate's error type and conversions from the client library.

use thiserror::Error;

/// Crate-wide error type.
///
/// The facade never classifies or recovers from these; whatever the
/// connection handle returns is handed back to the caller as-is.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error response returned by the node.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors: connection, timeout or undecodable responses.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Pending transaction error.
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),

    /// Contract deployment was mined but did not produce a contract.
    #[error("Deployment failed: {0}")]
    Deployment(String),
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) => AppError::Rpc(payload.to_string()),
            None => AppError::Transport(err.to_string()),
        }
    }
}

impl From<alloy::providers::PendingTransactionError> for AppError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        AppError::PendingTransaction(err.to_string())
    }
}

impl From<alloy::transports::http::reqwest::Error> for AppError {
    fn from(err: alloy::transports::http::reqwest::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
