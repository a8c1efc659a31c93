//! EIP-7702 authorization tuples
//!
//! The sender's EOA delegates its code to the multicall contract by signing
//! `(chain_id, delegate, nonce)`. The signature is over the EIP-7702 message
//! hash `keccak256(0x05 || rlp([chain_id, address, nonce]))`, which is domain
//! separated from transaction signatures.
//!
//! Because the sender also submits the transaction carrying the tuple, the
//! account nonce is consumed by the transaction before the authorization list
//! is processed, so the tuple must use `current_nonce + 1`.

use std::str::FromStr;

use alloy::{
    eips::eip7702::{Authorization, SignedAuthorization},
    primitives::{Address, U256},
    signers::{local::PrivateKeySigner, SignerSync},
};

use crate::errors::SigningError;

/// Parse the sender's private key
///
/// # Arguments
/// * `private_key` - Hex-encoded secp256k1 key, with or without `0x`
///
/// # Returns
/// * `Ok(PrivateKeySigner)` - Signer for the sender account
/// * `Err(SigningError::MissingKey)` - Key absent or blank
/// * `Err(SigningError::InvalidKey)` - Key is not a valid secp256k1 scalar
pub fn load_signer(private_key: Option<&str>) -> Result<PrivateKeySigner, SigningError> {
    let key = private_key
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .ok_or(SigningError::MissingKey)?;
    PrivateKeySigner::from_str(key).map_err(|e| SigningError::InvalidKey(e.to_string()))
}

/// Build the unsigned authorization tuple
///
/// The tuple nonce is `current_nonce + 1`.
pub fn build_authorization(
    chain_id: u64,
    delegate: Address,
    current_nonce: u64,
) -> Result<Authorization, SigningError> {
    let nonce = current_nonce
        .checked_add(1)
        .ok_or(SigningError::NonceOverflow(current_nonce))?;
    Ok(Authorization {
        chain_id: U256::from(chain_id),
        address: delegate,
        nonce,
    })
}

/// Sign an authorization tuple with the sender's key
pub fn sign_authorization(
    signer: &PrivateKeySigner,
    authorization: Authorization,
) -> Result<SignedAuthorization, SigningError> {
    let signature = signer
        .sign_hash_sync(&authorization.signature_hash())
        .map_err(|e| SigningError::Signature {
            what: "authorization",
            reason: e.to_string(),
        })?;
    Ok(authorization.into_signed(signature))
}
