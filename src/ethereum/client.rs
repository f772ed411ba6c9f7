//! Ethereum RPC client.

use alloy::{
    eips::BlockId,
    network::{Ethereum, ReceiptResponse, TransactionBuilder},
    primitives::{Address, Bytes, TxHash, B256, U256},
    providers::{Provider, ProviderBuilder, RootProvider, WsConnect},
    rpc::{
        client::RpcClient,
        types::{Block, Filter, Log, Transaction, TransactionReceipt, TransactionRequest},
    },
    transports::http::{
        reqwest::{self, Url},
        Http,
    },
};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

use crate::{
    error::{AppError, Result},
    ethereum::EthereumRpc,
    types::{DeployedContract, Deployment, SendOptions},
};

/// Type alias for the provider backing the client.
pub type EthProvider = RootProvider<Ethereum>;

/// Connection handle to a single Ethereum node.
///
/// Cheap to clone; clones share the same underlying provider.
#[derive(Clone, Debug)]
pub struct EthereumClient {
    /// The underlying provider.
    provider: Arc<EthProvider>,
    /// RPC URL for logging. Empty when wrapping an external provider.
    rpc_url: String,
    /// Timeout the connection was configured with, if this client built it.
    timeout: Option<Duration>,
}

impl EthereumClient {
    /// Create a client for an HTTP(S) endpoint.
    ///
    /// Note: This does NOT make any network calls. `timeout` bounds every
    /// request issued over the connection.
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let url = parse_url(rpc_url)?;
        match url.scheme() {
            "http" | "https" => {}
            "ws" | "wss" => {
                return Err(AppError::Config(format!(
                    "WebSocket URL must be opened with connect_ws: {}",
                    rpc_url
                )))
            }
            other => {
                return Err(AppError::Config(format!(
                    "Unsupported RPC URL scheme '{}': {}",
                    other, rpc_url
                )))
            }
        }

        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        let transport = Http::with_client(http_client, url);
        let is_local = transport.guess_local();
        let provider = RootProvider::new(RpcClient::new(transport, is_local));

        tracing::info!(
            rpc_url = %rpc_url,
            timeout = ?timeout,
            "Ethereum client created"
        );

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: rpc_url.to_string(),
            timeout: Some(timeout),
        })
    }

    /// Open a WebSocket connection, giving up after `timeout`.
    pub async fn connect_ws(rpc_url: &str, timeout: Duration) -> Result<Self> {
        let url = parse_url(rpc_url)?;
        if !matches!(url.scheme(), "ws" | "wss") {
            return Err(AppError::Config(format!("Not a WebSocket URL: {}", rpc_url)));
        }

        let connect = ProviderBuilder::default().connect_ws(WsConnect::new(rpc_url));
        let provider: EthProvider = tokio::time::timeout(timeout, connect)
            .await
            .map_err(|_| {
                AppError::Transport(format!(
                    "Timed out after {}ms connecting to {}",
                    timeout.as_millis(),
                    rpc_url
                ))
            })??;

        tracing::info!(
            rpc_url = %rpc_url,
            timeout = ?timeout,
            "Ethereum WebSocket client connected"
        );

        Ok(Self {
            provider: Arc::new(provider),
            rpc_url: rpc_url.to_string(),
            timeout: Some(timeout),
        })
    }

    /// Create a client for any supported endpoint.
    ///
    /// HTTP(S) URLs are set up without network I/O, WebSocket URLs are
    /// connected through [`connect_ws`](Self::connect_ws).
    pub async fn connect(rpc_url: &str, timeout: Duration) -> Result<Self> {
        match parse_url(rpc_url)?.scheme() {
            "ws" | "wss" => Self::connect_ws(rpc_url, timeout).await,
            _ => Self::new(rpc_url, timeout),
        }
    }

    /// Wrap a provider built elsewhere.
    pub fn from_provider(provider: EthProvider) -> Self {
        Self { provider: Arc::new(provider), rpc_url: String::new(), timeout: None }
    }

    /// Get the underlying provider.
    pub fn provider(&self) -> &EthProvider {
        &self.provider
    }

    /// The endpoint this client was built from.
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// The configured timeout, `None` for wrapped providers.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn parse_url(rpc_url: &str) -> Result<Url> {
    rpc_url.parse().map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))
}

/// Contract-creation transaction sent by `from` with gas limit `gas`.
fn deployment_request(deployment: &Deployment, options: SendOptions) -> TransactionRequest {
    TransactionRequest::default()
        .with_from(options.from)
        .with_gas_limit(options.gas)
        .with_deploy_code(deployment.data.clone())
}

/// Turn the receipt of a mined deployment into a contract handle.
fn deployed_contract(
    deployment: Deployment,
    tx_hash: TxHash,
    receipt: TransactionReceipt,
) -> Result<DeployedContract> {
    if !ReceiptResponse::status(&receipt) {
        return Err(AppError::Deployment(format!("transaction {} reverted", tx_hash)));
    }
    let address = receipt.contract_address.ok_or_else(|| {
        AppError::Deployment(format!("receipt for {} has no contract address", tx_hash))
    })?;

    Ok(DeployedContract {
        abi: deployment.abi,
        address,
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
    })
}

#[async_trait]
impl EthereumRpc for EthereumClient {
    async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        Ok(self.provider.get_transaction_receipt(hash).await?)
    }

    async fn get_block(&self, block: BlockId) -> Result<Option<Block>> {
        Ok(self.provider.get_block(block).await?)
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
        Ok(self.provider.estimate_gas(tx).await?)
    }

    async fn get_gas_price(&self) -> Result<u128> {
        Ok(self.provider.get_gas_price().await?)
    }

    async fn get_accounts(&self) -> Result<Vec<Address>> {
        Ok(self.provider.get_accounts().await?)
    }

    async fn deploy(
        &self,
        deployment: Deployment,
        options: SendOptions,
    ) -> Result<DeployedContract> {
        let tx = deployment_request(&deployment, options);

        let pending = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, from = %options.from, "Contract deployment submitted");

        let receipt = pending.get_receipt().await?;
        deployed_contract(deployment, tx_hash, receipt)
    }

    async fn get_network_id(&self) -> Result<u64> {
        Ok(self.provider.get_net_version().await?)
    }

    async fn get_chain_id(&self) -> Result<u64> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn get_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await?)
    }

    async fn get_block_transaction_count(&self, block: BlockId) -> Result<Option<u64>> {
        let count = match block {
            BlockId::Hash(hash) => {
                self.provider.get_block_transaction_count_by_hash(hash.block_hash).await?
            }
            BlockId::Number(tag) => self.provider.get_block_transaction_count_by_number(tag).await?,
        };
        Ok(count)
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        Ok(self.provider.get_balance(address).await?)
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64> {
        Ok(self.provider.get_transaction_count(address).await?)
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        Ok(self.provider.get_code_at(address).await?)
    }

    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>> {
        Ok(self.provider.get_transaction_by_hash(hash).await?)
    }

    async fn get_logs(&self, filter: Filter) -> Result<Vec<Log>> {
        Ok(self.provider.get_logs(&filter).await?)
    }
}
