//! Core types for the delegated multicall pipeline
//!
//! This module defines the records that flow between stages:
//! - Configuration records mirroring the JSON document
//! - Gas and fee parameters for the outer transaction
//! - The signed batch and its confirmation
//! - Pipeline stage tracking

use alloy::consensus::TxEnvelope;
pub use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};

use crate::config::checksummed;

/// Default gas limit for the batch transaction
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;
/// Default max fee per gas (10 gwei)
pub const DEFAULT_MAX_FEE_PER_GAS: u128 = 10_000_000_000;
/// Default max priority fee per gas (1 gwei)
pub const DEFAULT_MAX_PRIORITY_FEE_PER_GAS: u128 = 1_000_000_000;
/// Token decimals assumed when the config does not specify them
pub const DEFAULT_TOKEN_DECIMALS: u8 = 18;

/// Full application configuration
///
/// Built once at startup and passed by reference into each stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub network: NetworkConfig,
    pub contracts: ContractsConfig,
    pub recipients: RecipientsConfig,
    pub transactions: TransactionsConfig,
    /// Fixed gas and fee values, defaulted when absent
    #[serde(default)]
    pub gas: GasConfig,
}

/// Native currency descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Target network description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Chain ID, also used in the authorization tuple
    pub chain_id: u64,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

/// Contract addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsConfig {
    /// Multicall contract the EOA delegates to
    #[serde(deserialize_with = "checksummed")]
    pub multicall: Address,
    /// ERC20 token contract
    #[serde(deserialize_with = "checksummed")]
    pub token: Address,
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,
}

/// Transfer recipients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientsConfig {
    #[serde(deserialize_with = "checksummed")]
    pub recipient1: Address,
    #[serde(deserialize_with = "checksummed")]
    pub recipient2: Address,
}

/// Transfer amounts as decimal strings in whole units
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsConfig {
    pub token_transfer_amount: String,
    pub eth_transfer1_amount: String,
    pub eth_transfer2_amount: String,
}

/// Gas and fee parameters of the outer transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GasConfig {
    pub gas_limit: u64,
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
            max_fee_per_gas: DEFAULT_MAX_FEE_PER_GAS,
            max_priority_fee_per_gas: DEFAULT_MAX_PRIORITY_FEE_PER_GAS,
        }
    }
}

fn default_token_decimals() -> u8 {
    DEFAULT_TOKEN_DECIMALS
}

/// A signed, EIP-2718 encoded type 4 transaction ready for broadcast
#[derive(Debug, Clone)]
pub struct SignedBatch {
    /// Signed envelope
    pub envelope: TxEnvelope,
    /// Raw bytes passed to `eth_sendRawTransaction`
    pub raw: Bytes,
    /// Transaction hash
    pub hash: TxHash,
}

/// Inclusion details of a confirmed transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// Pipeline progress
///
/// Transitions are strictly forward; `Confirmed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// No valid [`AppConfig`] yet. A [`crate::BatchPipeline`] can only be
    /// built from a loaded config, so it never reports this stage itself;
    /// the binary is here until `AppConfig::load` succeeds.
    Unconfigured,
    /// Config and ABIs loaded, nothing built
    Configured,
    /// `aggregate` calldata built
    Encoded,
    /// Delegation tuple signed
    Authorized,
    /// Type 4 transaction signed and encoded
    Signed,
    /// Broadcast started
    Submitted,
    /// Receipt with success status received
    Confirmed,
    Failed,
}

impl Stage {
    /// Whether the pipeline can make no further progress
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Confirmed | Stage::Failed)
    }
}
