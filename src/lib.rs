//! Ethereum RPC Facade Library
//!
//! A thin async facade exposing a handful of Ethereum JSON-RPC calls:
//! transaction receipts, block details, gas estimation, account balances and
//! contract deployment.
//!
//! Every facade method forwards one call to a connection handle and returns
//! its result. Failures are logged through `tracing` and returned unchanged.
//! There is no retrying, batching, caching or signing.
//!
//! # Example
//!
//! ```rust,ignore
//! use alloy::eips::{BlockId, BlockNumberOrTag};
//! use ethereum_rpc_facade::RpcFacade;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let facade = RpcFacade::new("http://localhost:8545")?;
//!     let latest = facade.fetch_latest_block_number().await?;
//!     let block = BlockId::Number(BlockNumberOrTag::Number(latest));
//!     let count = facade.fetch_block_transaction_count(block).await?;
//!     println!("block {latest} has {count:?} transactions");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod facade;
pub mod logging;
pub mod types;

pub use config::{Config, DEFAULT_TIMEOUT_MS};
pub use error::{AppError, Result};
pub use ethereum::{EthereumClient, EthereumRpc};
pub use facade::RpcFacade;
pub use types::{DeployedContract, Deployment, SendOptions};
