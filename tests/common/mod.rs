//! Common utilities for integration tests.
#![allow(dead_code)]

use std::{
    io,
    sync::{Arc, Mutex},
    time::Duration,
};

use alloy::{
    eips::BlockId,
    primitives::{address, Address, Bytes, B256, U256},
    rpc::types::{Block, Filter, Log, Transaction, TransactionReceipt, TransactionRequest},
};
use async_trait::async_trait;
use ethereum_rpc_facade::{
    logging, AppError, Config, DeployedContract, Deployment, EthereumRpc, Result, RpcFacade,
    SendOptions,
};

/// Address the mock reports for every deployment.
pub const MOCK_CONTRACT_ADDRESS: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

/// A call received by [`MockRpc`], with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    TransactionReceipt(B256),
    Block(BlockId),
    EstimateGas(TransactionRequest),
    GasPrice,
    Accounts,
    Deploy(Deployment, SendOptions),
    NetworkId,
    ChainId,
    BlockNumber,
    BlockTransactionCount(BlockId),
    Balance(Address),
    TransactionCount(Address),
    Code(Address),
    Transaction(B256),
    Logs(Filter),
}

/// Canned values returned by [`MockRpc`].
#[derive(Debug, Clone, Default)]
pub struct MockResponses {
    pub receipt: Option<TransactionReceipt>,
    pub block: Option<Block>,
    pub gas_estimate: u64,
    pub gas_price: u128,
    pub accounts: Vec<Address>,
    pub network_id: u64,
    pub chain_id: u64,
    pub block_number: u64,
    pub block_transaction_count: Option<u64>,
    pub balance: U256,
    pub transaction_count: u64,
    pub code: Bytes,
    pub transaction: Option<Transaction>,
    pub logs: Vec<Log>,
}

/// Connection handle that records every call and answers from
/// [`MockResponses`], or fails every call with the same message.
#[derive(Debug, Default)]
pub struct MockRpc {
    calls: Mutex<Vec<Call>>,
    responses: MockResponses,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl MockRpc {
    pub fn new(responses: MockResponses) -> Self {
        Self { responses, ..Default::default() }
    }

    /// A handle whose every call fails with `AppError::Rpc(message)`.
    pub fn failing(message: &str) -> Self {
        Self { failure: Some(message.to_string()), ..Default::default() }
    }

    /// Sleep this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond<T>(&self, call: Call, value: T) -> Result<T> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(AppError::Rpc(message.clone())),
            None => Ok(value),
        }
    }
}

#[async_trait]
impl EthereumRpc for MockRpc {
    async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        self.respond(Call::TransactionReceipt(hash), self.responses.receipt.clone()).await
    }

    async fn get_block(&self, block: BlockId) -> Result<Option<Block>> {
        self.respond(Call::Block(block), self.responses.block.clone()).await
    }

    async fn estimate_gas(&self, tx: TransactionRequest) -> Result<u64> {
        self.respond(Call::EstimateGas(tx), self.responses.gas_estimate).await
    }

    async fn get_gas_price(&self) -> Result<u128> {
        self.respond(Call::GasPrice, self.responses.gas_price).await
    }

    async fn get_accounts(&self) -> Result<Vec<Address>> {
        self.respond(Call::Accounts, self.responses.accounts.clone()).await
    }

    async fn deploy(
        &self,
        deployment: Deployment,
        options: SendOptions,
    ) -> Result<DeployedContract> {
        let deployed = DeployedContract {
            abi: deployment.abi.clone(),
            address: MOCK_CONTRACT_ADDRESS,
            transaction_hash: B256::repeat_byte(0xde),
            block_number: Some(1),
            gas_used: 123_456,
        };
        self.respond(Call::Deploy(deployment, options), deployed).await
    }

    async fn get_network_id(&self) -> Result<u64> {
        self.respond(Call::NetworkId, self.responses.network_id).await
    }

    async fn get_chain_id(&self) -> Result<u64> {
        self.respond(Call::ChainId, self.responses.chain_id).await
    }

    async fn get_block_number(&self) -> Result<u64> {
        self.respond(Call::BlockNumber, self.responses.block_number).await
    }

    async fn get_block_transaction_count(&self, block: BlockId) -> Result<Option<u64>> {
        self.respond(Call::BlockTransactionCount(block), self.responses.block_transaction_count)
            .await
    }

    async fn get_balance(&self, address: Address) -> Result<U256> {
        self.respond(Call::Balance(address), self.responses.balance).await
    }

    async fn get_transaction_count(&self, address: Address) -> Result<u64> {
        self.respond(Call::TransactionCount(address), self.responses.transaction_count).await
    }

    async fn get_code(&self, address: Address) -> Result<Bytes> {
        self.respond(Call::Code(address), self.responses.code.clone()).await
    }

    async fn get_transaction(&self, hash: B256) -> Result<Option<Transaction>> {
        self.respond(Call::Transaction(hash), self.responses.transaction.clone()).await
    }

    async fn get_logs(&self, filter: Filter) -> Result<Vec<Log>> {
        self.respond(Call::Logs(filter), self.responses.logs.clone()).await
    }
}

/// Receipt of a mined contract creation at [`MOCK_CONTRACT_ADDRESS`].
pub fn sample_receipt() -> TransactionReceipt {
    serde_json::from_value(serde_json::json!({
        "type": "0x2",
        "status": "0x1",
        "cumulativeGasUsed": "0x1e240",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": B256::repeat_byte(0xde),
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0xbb),
        "blockNumber": "0x1",
        "gasUsed": "0x1e240",
        "effectiveGasPrice": "0x3b9aca00",
        "from": "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        "to": null,
        "contractAddress": MOCK_CONTRACT_ADDRESS,
    }))
    .unwrap()
}

/// An EIP-1559 call to [`MOCK_CONTRACT_ADDRESS`] mined in block 2 of a dev chain.
pub fn sample_transaction() -> Transaction {
    serde_json::from_str(
        r#"{"hash":"0x018b2331d461a4aeedf6a1f9cc37463377578244e6a35216057a8370714e798f","nonce":"0x1","blockHash":"0x6e4e53d1de650d5a5ebed19b38321db369ef1dc357904284ecf4d89b8834969c","blockNumber":"0x2","transactionIndex":"0x0","from":"0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266","to":"0x5fbdb2315678afecb367f032d93f642f64180aa3","value":"0x0","gasPrice":"0x3a29f0f8","gas":"0x1c9c380","maxFeePerGas":"0xba43b7400","maxPriorityFeePerGas":"0x5f5e100","input":"0xd09de08a","r":"0xd309309a59a49021281cb6bb41d164c96eab4e50f0c1bd24c03ca336e7bc2bb7","s":"0x28a7f089143d0a1355ebeb2a1b9f0e5ad9eca4303021c1400d61bc23c9ac5319","v":"0x0","yParity":"0x0","chainId":"0x7a69","accessList":[],"type":"0x2"}"#,
    )
    .unwrap()
}

/// In-memory sink for formatted `tracing` output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// A subscriber writing every event, at any level, into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let buffer = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || buffer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::TRACE)
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Helper to create a facade for a live node from environment variables.
///
/// Returns `None` when `ETHEREUM_RPC_URL` is unset. A configured node that
/// cannot be reached fails the test instead of skipping it.
pub async fn create_live_facade() -> Option<RpcFacade> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let rpc_url = std::env::var("ETHEREUM_RPC_URL").ok()?;
    if rpc_url.is_empty() {
        return None;
    }

    let config = Config::from_env().expect("invalid live node configuration");
    logging::init_tracing(&config.log_level);

    match RpcFacade::connect(&config).await {
        Ok(facade) => Some(facade),
        Err(e) => panic!("Failed to connect to {}: {}", config.rpc_url, e),
    }
}

/// Skip test if `ETHEREUM_RPC_URL` is not set.
#[macro_export]
macro_rules! skip_if_no_facade {
    () => {
        match common::create_live_facade().await {
            Some(facade) => facade,
            None => {
                eprintln!("Skipping test: ETHEREUM_RPC_URL not set");
                return;
            }
        }
    };
}
