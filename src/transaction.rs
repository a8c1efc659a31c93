//! Type 4 transaction assembly and signing
//!
//! The outer transaction is a self-call: `to` is the sender's own address,
//! which executes the multicall code installed by the authorization tuple.
//! Gas and fee fields are fixed values from [`GasConfig`].

use alloy::{
    consensus::{SignableTransaction, TxEip7702, TxEnvelope},
    eips::{eip2718::Encodable2718, eip7702::SignedAuthorization},
    network::TxSignerSync,
    primitives::{Address, Bytes, U256},
    signers::local::PrivateKeySigner,
};

use crate::{
    errors::SigningError,
    types::{GasConfig, SignedBatch},
};

/// Assemble the unsigned type 4 transaction
///
/// # Arguments
/// * `chain_id` - Target chain
/// * `sender` - EOA sending the transaction, also the call destination
/// * `nonce` - Sender's current account nonce
/// * `gas` - Fixed gas limit and fee caps
/// * `authorization` - The single signed delegation tuple
/// * `calldata` - Encoded `aggregate` call
pub fn assemble(
    chain_id: u64,
    sender: Address,
    nonce: u64,
    gas: &GasConfig,
    authorization: SignedAuthorization,
    calldata: Bytes,
) -> TxEip7702 {
    TxEip7702 {
        chain_id,
        nonce,
        gas_limit: gas.gas_limit,
        max_fee_per_gas: gas.max_fee_per_gas,
        max_priority_fee_per_gas: gas.max_priority_fee_per_gas,
        to: sender,
        value: U256::ZERO,
        access_list: Default::default(),
        authorization_list: vec![authorization],
        input: calldata,
    }
}

/// Sign the transaction and encode it for broadcast
///
/// The signer must control the destination account and must have produced
/// every authorization in the list; otherwise the delegation would apply to a
/// different account than the one executing the batch.
///
/// # Returns
/// * `Ok(SignedBatch)` - Envelope, EIP-2718 raw bytes and hash
/// * `Err(SigningError::KeyMismatch)` - Signer is not the sender or authority
pub fn sign_transaction(
    signer: &PrivateKeySigner,
    mut tx: TxEip7702,
) -> Result<SignedBatch, SigningError> {
    let signer_address = signer.address();
    if tx.to != signer_address {
        return Err(SigningError::KeyMismatch {
            expected: tx.to,
            actual: signer_address,
        });
    }
    for authorization in &tx.authorization_list {
        let authority = authorization.recover_authority().map_err(|e| SigningError::Signature {
            what: "authorization",
            reason: e.to_string(),
        })?;
        if authority != signer_address {
            return Err(SigningError::KeyMismatch {
                expected: authority,
                actual: signer_address,
            });
        }
    }

    let signature = signer
        .sign_transaction_sync(&mut tx)
        .map_err(|e| SigningError::Signature {
            what: "transaction",
            reason: e.to_string(),
        })?;
    let envelope = TxEnvelope::from(tx.into_signed(signature));
    let hash = *envelope.tx_hash();
    let raw: Bytes = envelope.encoded_2718().into();
    log::debug!("raw transaction: {raw}");

    Ok(SignedBatch {
        envelope,
        raw,
        hash,
    })
}
