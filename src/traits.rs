//! Network access trait
//!
//! The pipeline only needs four JSON-RPC interactions. Keeping them behind
//! [`ChainClient`] lets the same pipeline run against an alloy provider in
//! production and an in-memory client in tests.

use std::time::Duration;

use alloy::primitives::{Address, TxHash};

use crate::{errors::SubmissionError, types::Confirmation};

/// JSON-RPC operations used by the pipeline
///
/// Calls are made strictly sequentially: chain id, nonce, broadcast, receipt.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// `eth_chainId`
    async fn chain_id(&self) -> Result<u64, SubmissionError>;

    /// `eth_getTransactionCount` at the latest block
    async fn transaction_count(&self, address: Address) -> Result<u64, SubmissionError>;

    /// `eth_sendRawTransaction`
    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, SubmissionError>;

    /// Block until a receipt for `tx_hash` is available
    ///
    /// # Arguments
    /// * `tx_hash` - Hash returned by the broadcast
    /// * `timeout` - Upper bound on the wait, `None` waits indefinitely
    ///
    /// # Returns
    /// * `Ok(Confirmation)` - Included and executed successfully
    /// * `Err(SubmissionError::Reverted)` - Included but execution reverted
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        timeout: Option<Duration>,
    ) -> Result<Confirmation, SubmissionError>;
}

impl<C: ChainClient> ChainClient for &C {
    async fn chain_id(&self) -> Result<u64, SubmissionError> {
        (**self).chain_id().await
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, SubmissionError> {
        (**self).transaction_count(address).await
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, SubmissionError> {
        (**self).send_raw_transaction(raw).await
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        timeout: Option<Duration>,
    ) -> Result<Confirmation, SubmissionError> {
        (**self).wait_for_receipt(tx_hash, timeout).await
    }
}
