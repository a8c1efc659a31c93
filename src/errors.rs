//! Error types for the delegated multicall pipeline
//!
//! Every pipeline stage has its own error kind:
//! - Configuration and ABI loading
//! - Calldata encoding
//! - Key loading and signing
//! - Broadcasting and receipt confirmation
//!
//! `BatchError` wraps all of them so callers can propagate with `?` and still
//! match on the failing stage.

use alloy::{
    primitives::{Address, TxHash},
    providers::PendingTransactionError,
    transports::TransportError,
};
use thiserror::Error;

/// Top-level error type for the pipeline
///
/// Each variant identifies the stage that aborted the run.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Unusable configuration or contract interface files
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Calldata could not be produced
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Key loading or signing failed
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// Network failure, rejection or revert
    #[error("Submission error: {0}")]
    Submission(#[from] SubmissionError),

    /// The pipeline was driven out of order
    #[error("Pipeline error: {0}")]
    Stage(String),
}

/// Configuration-specific errors
///
/// Raised while reading the JSON configuration document or the ABI files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Missing key, wrong type, bad address or any other schema violation
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// An ABI document is not a valid JSON ABI array
    #[error("Malformed ABI {name}: {reason}")]
    Abi {
        name: String,
        reason: String,
    },

    /// Neither an override nor `network.rpcUrls` supplied an endpoint
    #[error("No RPC URL configured")]
    NoRpcUrl,

    /// A value passed validation by serde but is not usable
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Calldata encoding errors
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The ABI does not expose the function the pipeline needs
    ///
    /// # Fields
    /// * `contract` - Which interface was checked
    /// * `signature` - Expected canonical signature
    #[error("ABI for {contract} has no function {signature}")]
    MissingFunction {
        contract: String,
        signature: String,
    },

    /// Amount is not a non-negative decimal number
    #[error("Invalid amount {amount:?}: {reason}")]
    InvalidAmount {
        amount: String,
        reason: String,
    },

    /// Amount has more fractional digits than the unit supports
    #[error("Amount {amount:?} exceeds {decimals} decimal places")]
    ExcessPrecision {
        amount: String,
        decimals: u8,
    },

    /// Scaled amount does not fit in uint256
    #[error("Amount {amount:?} overflows uint256")]
    Overflow {
        amount: String,
    },

    /// Calldata does not match the expected function schema
    #[error("Failed to decode {function} calldata: {reason}")]
    Decode {
        function: &'static str,
        reason: String,
    },
}

/// Signing errors
#[derive(Debug, Error)]
pub enum SigningError {
    /// No private key was supplied
    #[error("Private key is missing")]
    MissingKey,

    /// The supplied private key could not be parsed
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// The signer failed to produce a signature
    #[error("Failed to sign {what}: {reason}")]
    Signature {
        what: &'static str,
        reason: String,
    },

    /// The signing key does not control the account being used
    #[error("Signer {actual} does not match sender {expected}")]
    KeyMismatch {
        expected: Address,
        actual: Address,
    },

    /// Current nonce is already at `u64::MAX`
    #[error("Nonce {0} cannot be incremented")]
    NonceOverflow(u64),
}

/// Submission errors
///
/// Every network-side failure ends up here; nothing is retried.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Transport or JSON-RPC failure
    #[error("RPC request failed: {0}")]
    Rpc(#[from] TransportError),

    /// The node rejected the transaction with revert data
    #[error("Transaction rejected: {reason}")]
    Rejected {
        reason: String,
    },

    /// Waiting for the receipt failed or timed out
    #[error("Failed waiting for receipt: {0}")]
    Receipt(#[from] PendingTransactionError),

    /// The transaction was mined but execution reverted
    ///
    /// # Fields
    /// * `tx_hash` - Hash of the reverted transaction
    /// * `block_number` - Block that included it, if reported
    #[error("Transaction {tx_hash} reverted in block {block_number:?}")]
    Reverted {
        tx_hash: TxHash,
        block_number: Option<u64>,
        gas_used: u64,
    },

    /// The RPC endpoint serves a different chain than configured
    #[error("RPC chain id {actual} does not match configured chain id {expected}")]
    ChainIdMismatch {
        expected: u64,
        actual: u64,
    },
}
