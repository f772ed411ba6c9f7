//! Contract deployment types.

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes, TxHash},
};
use serde::{Deserialize, Serialize};

/// A contract template with its deployment data attached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Contract ABI.
    pub abi: JsonAbi,
    /// Creation bytecode sent as transaction input.
    pub data: Bytes,
}

impl Deployment {
    /// Create a deployment from an ABI and its creation bytecode.
    pub fn new(abi: JsonAbi, data: Bytes) -> Self {
        Self { abi, data }
    }
}

/// Parameters the deployment transaction is sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    /// Node-managed account the deployment originates from.
    pub from: Address,
    /// Gas limit for the deployment transaction.
    pub gas: u64,
}

/// Handle to a mined contract deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedContract {
    /// Contract ABI.
    pub abi: JsonAbi,
    /// Address the contract was created at.
    pub address: Address,
    /// Hash of the deployment transaction.
    pub transaction_hash: TxHash,
    /// Block the deployment was mined in, when the node reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Gas consumed by the deployment.
    pub gas_used: u64,
}
