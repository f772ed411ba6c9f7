//! Connection handle abstraction.

use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes, B256, U256},
    rpc::types::{Block, Filter, Log, Transaction, TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;

use crate::{
    error::Result,
    types::{DeployedContract, Deployment, SendOptions},
};

/// Operations a connection to an Ethereum node provides.
///
/// [`EthereumClient`](super::EthereumClient) implements this over an `alloy`
/// provider. Tests can supply their own implementation to observe exactly
/// what the facade forwards.
#[async_trait]
pub trait EthereumRpc: Send + Sync {
    /// `eth_getTransactionReceipt`
    async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;

    /// `eth_getBlockByNumber` or `eth_getBlockByHash`, without full transactions.
    async fn get_block(&self, block: BlockId) -> Result<Option<Block>>;

    /// `eth_estimateGas`
    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64>;

    /// `eth_gasPrice`
    async fn get_gas_price(&self) -> Result<u128>;

    /// `eth_accounts`
    async fn get_accounts(&self) -> Result<Vec<Address>>;

    /// Submit a contract deployment and wait for it to be mined.
    async fn deploy(
        &self,
        deployment: Deployment,
        options: SendOptions,
    ) -> Result<DeployedContract>;

    /// `net_version`
    async fn get_network_id(&self) -> Result<u64>;

    /// `eth_chainId`
    async fn get_chain_id(&self) -> Result<u64>;

    /// `eth_blockNumber`
    async fn get_block_number(&self) -> Result<u64>;

    /// `eth_getBlockTransactionCountByNumber` or `eth_getBlockTransactionCountByHash`.
    async fn get_block_transaction_count(&self, block: BlockId) -> Result<Option<u64>>;

    /// `eth_getBalance` at the latest block.
    async fn get_balance(&self, address: Address) -> Result<U256>;

    /// `eth_getTransactionCount` at the latest block.
    async fn get_transaction_count(&self, address: Address) -> Result<u64>;

    /// `eth_getCode` at the latest block.
    async fn get_code(&self, address: Address) -> Result<Bytes>;

    /// `eth_getTransactionByHash`
    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>>;

    /// `eth_getLogs`
    async fn get_logs(&self, filter: Filter) -> Result<Vec<Log>>;
}
