//! Ethereum interaction module.
//!
//! Contains the connection handle trait and the `alloy`-backed client.

pub mod client;
pub mod rpc;

pub use client::{EthProvider, EthereumClient};
pub use rpc::EthereumRpc;
