//! The build → sign → send → wait pipeline
//!
//! [`BatchPipeline`] drives the stages in order and records progress as a
//! [`Stage`]. Any error moves it to `Stage::Failed`; a pipeline that failed or
//! confirmed cannot be run again.
//!
//! The private key is validated before the first RPC call, so a missing key
//! never costs a network round trip.

use std::time::Duration;

use alloy::{eips::eip7702::SignedAuthorization, primitives::Address};

use crate::{
    authorization::{build_authorization, load_signer, sign_authorization},
    encoder::{encode_batch, EncodedBatch},
    errors::{BatchError, SubmissionError},
    submitter,
    traits::ChainClient,
    transaction::{assemble, sign_transaction},
    types::{AppConfig, Confirmation, SignedBatch, Stage},
    utils::{abi_utils::ContractInterfaces, amount_utils::format_amount},
};

/// Everything produced before broadcast
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    /// Sender EOA, also the transaction destination
    pub sender: Address,
    /// Sender nonce observed on chain, used by the transaction
    pub nonce: u64,
    /// Sub-calls and aggregate calldata
    pub batch: EncodedBatch,
    /// Delegation tuple, nonce `nonce + 1`
    pub authorization: SignedAuthorization,
    /// Signed type 4 transaction
    pub signed: SignedBatch,
}

/// Single-shot pipeline over a [`ChainClient`]
pub struct BatchPipeline<'a, C> {
    config: &'a AppConfig,
    interfaces: &'a ContractInterfaces,
    client: C,
    verify_chain_id: bool,
    stage: Stage,
}

impl<'a, C: ChainClient> BatchPipeline<'a, C> {
    /// Create a pipeline for a loaded configuration
    ///
    /// The pipeline starts in `Stage::Configured` and checks the RPC chain id
    /// against `network.chainId` unless disabled with
    /// [`BatchPipeline::with_chain_check`].
    pub fn new(config: &'a AppConfig, interfaces: &'a ContractInterfaces, client: C) -> Self {
        Self {
            config,
            interfaces,
            client,
            verify_chain_id: true,
            stage: Stage::Configured,
        }
    }

    /// Enable or disable the `eth_chainId` check
    pub fn with_chain_check(mut self, enabled: bool) -> Self {
        self.verify_chain_id = enabled;
        self
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Network client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Encode, authorize and sign without broadcasting
    ///
    /// # Arguments
    /// * `private_key` - Sender key; `None` fails with `SigningError::MissingKey`
    ///
    /// # Returns
    /// * `Ok(PreparedBatch)` - Pipeline is now `Stage::Signed`
    /// * `Err(BatchError)` - Pipeline is now `Stage::Failed`
    pub async fn prepare(&mut self, private_key: Option<&str>) -> Result<PreparedBatch, BatchError> {
        self.expect_stage(Stage::Configured)?;
        let result = self.prepare_stages(private_key).await;
        self.track(result)
    }

    /// Broadcast a prepared batch and wait for its receipt
    ///
    /// # Arguments
    /// * `prepared` - Output of [`BatchPipeline::prepare`]
    /// * `timeout` - Receipt wait bound, `None` waits indefinitely
    pub async fn submit(
        &mut self,
        prepared: &PreparedBatch,
        timeout: Option<Duration>,
    ) -> Result<Confirmation, BatchError> {
        self.expect_stage(Stage::Signed)?;
        self.stage = Stage::Submitted;
        let result = submitter::submit(&self.client, &prepared.signed, timeout)
            .await
            .map_err(BatchError::from);
        let confirmation = self.track(result)?;

        if let Some(url) = self.config.explorer_tx_url(&confirmation.tx_hash) {
            log::info!("Explorer: {url}");
        }
        self.stage = Stage::Confirmed;
        Ok(confirmation)
    }

    /// Run every stage: prepare, broadcast, confirm
    pub async fn run(
        &mut self,
        private_key: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Confirmation, BatchError> {
        let prepared = self.prepare(private_key).await?;
        self.submit(&prepared, timeout).await
    }

    async fn prepare_stages(&mut self, private_key: Option<&str>) -> Result<PreparedBatch, BatchError> {
        let config = self.config;
        let network = &config.network;

        let signer = load_signer(private_key)?;
        let sender = signer.address();
        log::info!("Account address: {sender}");

        if self.verify_chain_id {
            let actual = self.client.chain_id().await?;
            if actual != network.chain_id {
                return Err(SubmissionError::ChainIdMismatch {
                    expected: network.chain_id,
                    actual,
                }
                .into());
            }
        }

        let batch = encode_batch(config, self.interfaces)?;
        log::info!(
            "Encoded {} calls moving {} {} natively",
            batch.calls.len(),
            format_amount(batch.native_value_total(), network.native_currency.decimals),
            network.native_currency.symbol
        );
        self.stage = Stage::Encoded;

        let nonce = self.client.transaction_count(sender).await?;
        log::info!("Current nonce: {nonce}");

        let authorization = build_authorization(network.chain_id, config.contracts.multicall, nonce)?;
        let authorization = sign_authorization(&signer, authorization)?;
        log::info!("Authorization signed successfully");
        self.stage = Stage::Authorized;

        let tx = assemble(
            network.chain_id,
            sender,
            nonce,
            &config.gas,
            authorization.clone(),
            batch.calldata.clone(),
        );
        let signed = sign_transaction(&signer, tx)?;
        log::info!("Type 4 transaction built successfully");
        self.stage = Stage::Signed;

        Ok(PreparedBatch {
            sender,
            nonce,
            batch,
            authorization,
            signed,
        })
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), BatchError> {
        if self.stage != expected {
            return Err(BatchError::Stage(format!(
                "expected stage {expected:?}, pipeline is at {:?}",
                self.stage
            )));
        }
        Ok(())
    }

    fn track<T>(&mut self, result: Result<T, BatchError>) -> Result<T, BatchError> {
        if let Err(error) = &result {
            log::error!("{error}");
            self.stage = Stage::Failed;
        }
        result
    }
}
