//! Alloy-backed [`ChainClient`]
//!
//! Connects to the configured endpoint over HTTP(S) or WebSocket, chosen by
//! the URL scheme.

use std::time::Duration;

use alloy::{
    network::ReceiptResponse,
    primitives::{Address, TxHash},
    providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder, WsConnect},
};
use url::Url;

use crate::{
    errors::{BatchError, ConfigError, SubmissionError},
    traits::ChainClient,
    types::Confirmation,
    utils::error_utils::rpc_revert_reason,
};

/// [`ChainClient`] over any alloy [`Provider`]
#[derive(Debug, Clone)]
pub struct ProviderClient<P> {
    provider: P,
}

impl<P: Provider> ProviderClient<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

/// Transport selected for an RPC URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Http(Url),
    Ws(Url),
}

impl Endpoint {
    /// Parse `rpc_url` and pick the transport from its scheme
    ///
    /// `http`/`https` select HTTP, `ws`/`wss` select WebSocket. Any other
    /// scheme, or an unparseable URL, is a configuration error.
    pub fn parse(rpc_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue {
            field: "rpcUrl",
            reason,
        };
        let url = Url::parse(rpc_url.trim()).map_err(|e| invalid(format!("{rpc_url}: {e}")))?;
        match url.scheme() {
            "http" | "https" => Ok(Self::Http(url)),
            "ws" | "wss" => Ok(Self::Ws(url)),
            other => Err(invalid(format!(
                "unsupported scheme {other:?}, expected http, https, ws or wss"
            ))),
        }
    }
}

/// Connect to `rpc_url`
///
/// # Returns
/// * `Ok(ProviderClient)` - Client over an HTTP or WebSocket provider
/// * `Err(BatchError)` - Malformed URL or failed WebSocket handshake
pub async fn connect(rpc_url: &str) -> Result<ProviderClient<DynProvider>, BatchError> {
    let provider = match Endpoint::parse(rpc_url)? {
        Endpoint::Http(url) => ProviderBuilder::new().connect_http(url).erased(),
        Endpoint::Ws(url) => ProviderBuilder::new()
            .connect_ws(WsConnect::new(url.as_str()))
            .await
            .map_err(SubmissionError::Rpc)?
            .erased(),
    };
    Ok(ProviderClient::new(provider))
}

fn confirmation<R: ReceiptResponse>(
    tx_hash: TxHash,
    receipt: &R,
) -> Result<Confirmation, SubmissionError> {
    let block_number = receipt.block_number();
    let gas_used = receipt.gas_used();
    if !receipt.status() {
        return Err(SubmissionError::Reverted {
            tx_hash,
            block_number,
            gas_used,
        });
    }
    Ok(Confirmation {
        tx_hash,
        block_number,
        gas_used,
    })
}

impl<P: Provider> ChainClient for ProviderClient<P> {
    async fn chain_id(&self) -> Result<u64, SubmissionError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, SubmissionError> {
        Ok(self.provider.get_transaction_count(address).await?)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, SubmissionError> {
        match self.provider.send_raw_transaction(raw).await {
            Ok(pending) => Ok(*pending.tx_hash()),
            Err(error) => Err(match rpc_revert_reason(&error) {
                Some(reason) => SubmissionError::Rejected { reason },
                None => SubmissionError::Rpc(error),
            }),
        }
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        timeout: Option<Duration>,
    ) -> Result<Confirmation, SubmissionError> {
        // Already mined, no need to start the block watcher
        if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
            return confirmation(tx_hash, &receipt);
        }

        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_timeout(timeout)
            .get_receipt()
            .await?;
        confirmation(tx_hash, &receipt)
    }
}
