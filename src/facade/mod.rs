//! Facade over common Ethereum JSON-RPC calls.
//!
//! Every method forwards exactly one call to the connection handle and hands
//! back its result untouched. Failures are logged with the name of the
//! operation and then returned unchanged; nothing is retried or swallowed.

use alloy::{
    eips::BlockId,
    json_abi::JsonAbi,
    primitives::{Address, Bytes, B256, U256},
    rpc::types::{Block, Filter, Log, Transaction, TransactionReceipt, TransactionRequest},
};
use std::{sync::Arc, time::Duration};

use crate::{
    config::{Config, DEFAULT_TIMEOUT_MS},
    error::Result,
    ethereum::{EthereumClient, EthereumRpc},
    types::{DeployedContract, Deployment, SendOptions},
};

/// Thin async facade holding one connection handle.
///
/// The handle is shared behind an [`Arc`] and never mutated, so a facade can
/// be cloned freely and called from concurrent tasks.
pub struct RpcFacade<C: ?Sized = EthereumClient> {
    client: Arc<C>,
}

impl<C: ?Sized> Clone for RpcFacade<C> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client) }
    }
}

impl RpcFacade<EthereumClient> {
    /// Create a facade for an HTTP(S) endpoint with the default 10s timeout.
    ///
    /// No network calls are made.
    pub fn new(rpc_url: &str) -> Result<Self> {
        Self::with_timeout(rpc_url, Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }

    /// Create a facade for an HTTP(S) endpoint with an explicit timeout.
    pub fn with_timeout(rpc_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::from_client(EthereumClient::new(rpc_url, timeout)?))
    }

    /// Create a facade from a [`Config`] holding an HTTP(S) URL.
    ///
    /// WebSocket URLs are rejected; use [`connect`](Self::connect) for those.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(&config.rpc_url, config.timeout())
    }

    /// Create a facade from a [`Config`] holding any supported URL.
    ///
    /// WebSocket endpoints are connected before this returns.
    pub async fn connect(config: &Config) -> Result<Self> {
        let client = EthereumClient::connect(&config.rpc_url, config.timeout()).await?;
        Ok(Self::from_client(client))
    }

    /// Open a WebSocket endpoint; `timeout` bounds the connect.
    pub async fn connect_ws(rpc_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::from_client(EthereumClient::connect_ws(rpc_url, timeout).await?))
    }
}

impl<C: EthereumRpc> RpcFacade<C> {
    /// Reuse an existing connection handle.
    pub fn from_client(client: C) -> Self {
        Self { client: Arc::new(client) }
    }
}

impl<C: EthereumRpc + ?Sized> RpcFacade<C> {
    /// Reuse a connection handle that is already shared.
    pub fn from_shared(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Get the connection handle.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch a transaction receipt by transaction hash.
    ///
    /// Returns `None` when the transaction is unknown or still pending.
    pub async fn fetch_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>> {
        tracing::debug!(tx_hash = %tx_hash, "Fetching transaction receipt");
        logged("fetch_transaction_receipt", self.client.get_transaction_receipt(tx_hash).await)
    }

    /// Fetch a block by number, tag or hash.
    pub async fn fetch_block_details(&self, block: BlockId) -> Result<Option<Block>> {
        tracing::debug!(block = ?block, "Fetching block details");
        logged("fetch_block_details", self.client.get_block(block).await)
    }

    /// Estimate the gas a transaction would use.
    pub async fn estimate_gas_usage(&self, tx: TransactionRequest) -> Result<u64> {
        logged("estimate_gas_usage", self.client.estimate_gas(tx).await)
    }

    /// Fetch the current gas price in wei.
    pub async fn fetch_gas_price(&self) -> Result<u128> {
        logged("fetch_gas_price", self.client.get_gas_price().await)
    }

    /// Fetch the accounts the node manages.
    pub async fn fetch_user_accounts(&self) -> Result<Vec<Address>> {
        logged("fetch_user_accounts", self.client.get_accounts().await)
    }

    /// Deploy a contract.
    ///
    /// Builds a contract template from `abi` with `bytecode` as deployment
    /// data and sends it from `from` with gas limit `gas`. The node signs
    /// with its own account for `from`.
    pub async fn deploy_contract(
        &self,
        abi: JsonAbi,
        bytecode: Bytes,
        from: Address,
        gas: u64,
    ) -> Result<DeployedContract> {
        tracing::debug!(from = %from, gas = gas, code_len = bytecode.len(), "Deploying contract");

        let deployment = Deployment::new(abi, bytecode);
        logged(
            "deploy_contract",
            self.client.deploy(deployment, SendOptions { from, gas }).await,
        )
    }

    /// Fetch the network id (`net_version`).
    pub async fn fetch_network_id(&self) -> Result<u64> {
        logged("fetch_network_id", self.client.get_network_id().await)
    }

    /// Fetch the chain id (`eth_chainId`).
    pub async fn fetch_chain_id(&self) -> Result<u64> {
        logged("fetch_chain_id", self.client.get_chain_id().await)
    }

    /// Fetch the latest block number.
    pub async fn fetch_latest_block_number(&self) -> Result<u64> {
        logged("fetch_latest_block_number", self.client.get_block_number().await)
    }

    /// Fetch the number of transactions in a block.
    ///
    /// Returns `None` when the block does not exist.
    pub async fn fetch_block_transaction_count(&self, block: BlockId) -> Result<Option<u64>> {
        tracing::debug!(block = ?block, "Fetching block transaction count");
        logged(
            "fetch_block_transaction_count",
            self.client.get_block_transaction_count(block).await,
        )
    }

    /// Get the balance of an address in wei.
    pub async fn get_balance(&self, address: Address) -> Result<U256> {
        tracing::debug!(address = %address, "Querying balance");
        logged("get_balance", self.client.get_balance(address).await)
    }

    /// Get the number of transactions sent from an address.
    pub async fn get_transaction_count(&self, address: Address) -> Result<u64> {
        logged("get_transaction_count", self.client.get_transaction_count(address).await)
    }

    /// Get the code deployed at an address.
    pub async fn get_code(&self, address: Address) -> Result<Bytes> {
        logged("get_code", self.client.get_code(address).await)
    }

    /// Get a transaction by hash.
    pub async fn get_transaction(&self, tx_hash: B256) -> Result<Option<Transaction>> {
        logged("get_transaction", self.client.get_transaction(tx_hash).await)
    }

    /// Get the logs matching a filter.
    pub async fn get_past_logs(&self, filter: Filter) -> Result<Vec<Log>> {
        logged("get_past_logs", self.client.get_logs(filter).await)
    }
}

/// Log a failed call and pass the result through unchanged.
fn logged<T>(operation: &'static str, result: Result<T>) -> Result<T> {
    result.inspect_err(|err| {
        tracing::error!(operation = operation, error = %err, "Ethereum RPC call failed")
    })
}
