//! Broadcast and confirmation
//!
//! Sends the signed batch exactly once and waits for its receipt. Failures are
//! reported as [`SubmissionError`]; nothing is retried or resubmitted.

use std::time::Duration;

use crate::{
    errors::SubmissionError,
    traits::ChainClient,
    types::{Confirmation, SignedBatch},
};

/// Broadcast `batch` and wait for inclusion
///
/// # Arguments
/// * `client` - Network access
/// * `batch` - Signed transaction from [`crate::transaction::sign_transaction`]
/// * `timeout` - Receipt wait bound, `None` waits indefinitely
pub async fn submit<C: ChainClient>(
    client: &C,
    batch: &SignedBatch,
    timeout: Option<Duration>,
) -> Result<Confirmation, SubmissionError> {
    let tx_hash = client.send_raw_transaction(&batch.raw).await?;
    if tx_hash != batch.hash {
        log::warn!("node returned hash {tx_hash}, locally computed {}", batch.hash);
    }
    log::info!("Transaction sent with hash: {tx_hash}");

    let confirmation = client.wait_for_receipt(tx_hash, timeout).await?;
    log::info!(
        "Transaction confirmed in block {}",
        confirmation
            .block_number
            .map_or_else(|| "unknown".to_string(), |n| n.to_string())
    );
    log::info!("Gas used: {}", confirmation.gas_used);
    Ok(confirmation)
}
