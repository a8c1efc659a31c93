//! Calldata encoding for the batch
//!
//! Produces the three sub-calls executed by the delegated multicall code, in
//! fixed order, and wraps them into a single `aggregate` payload:
//! 1. ERC20 `transfer(recipient1, tokenTransferAmount)` on the token contract
//! 2. Native transfer of `ethTransfer1Amount` to recipient1
//! 3. Native transfer of `ethTransfer2Amount` to recipient2

use alloy::primitives::{Bytes, U256};

use crate::{
    errors::EncodingError,
    types::AppConfig,
    utils::{
        abi_utils::{encode_aggregate, encode_transfer, Call, ContractInterfaces},
        amount_utils::parse_amount,
    },
};

/// Sub-calls and the `aggregate` calldata wrapping them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBatch {
    /// Sub-calls in execution order
    pub calls: Vec<Call>,
    /// ABI-encoded `aggregate(calls)`
    pub calldata: Bytes,
}

impl EncodedBatch {
    /// Total native value moved by the sub-calls
    pub fn native_value_total(&self) -> U256 {
        self.calls
            .iter()
            .fold(U256::ZERO, |total, call| total.saturating_add(call.value))
    }
}

/// Build the ordered sub-calls described by the configuration
///
/// Token amounts scale by `contracts.tokenDecimals`, native amounts by
/// `network.nativeCurrency.decimals`.
pub fn build_calls(
    config: &AppConfig,
    interfaces: &ContractInterfaces,
) -> Result<Vec<Call>, EncodingError> {
    let native_decimals = config.network.native_currency.decimals;
    let token_amount = parse_amount(
        &config.transactions.token_transfer_amount,
        config.contracts.token_decimals,
    )?;
    let native1 = parse_amount(&config.transactions.eth_transfer1_amount, native_decimals)?;
    let native2 = parse_amount(&config.transactions.eth_transfer2_amount, native_decimals)?;

    Ok(vec![
        Call {
            target: config.contracts.token,
            value: U256::ZERO,
            data: encode_transfer(interfaces, config.recipients.recipient1, token_amount).into(),
        },
        Call {
            target: config.recipients.recipient1,
            value: native1,
            data: Bytes::new(),
        },
        Call {
            target: config.recipients.recipient2,
            value: native2,
            data: Bytes::new(),
        },
    ])
}

/// Encode the full batch
///
/// Selectors come from `interfaces`, which was validated against the loaded
/// ABIs.
pub fn encode_batch(
    config: &AppConfig,
    interfaces: &ContractInterfaces,
) -> Result<EncodedBatch, EncodingError> {
    let calls = build_calls(config, interfaces)?;
    let calldata: Bytes = encode_aggregate(interfaces, calls.clone()).into();
    log::debug!("aggregate calldata: {calldata}");

    Ok(EncodedBatch { calls, calldata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::abi_utils::{decode_aggregate, decode_transfer};
    use alloy::primitives::address;

    fn config(token: &str, eth1: &str, eth2: &str) -> AppConfig {
        let json = serde_json::json!({
            "network": {
                "chainId": 560048,
                "chainName": "Hoodi",
                "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
                "rpcUrls": ["http://localhost:8545"],
                "blockExplorerUrls": []
            },
            "contracts": {
                "multicall": address!("cA11bde05977b3631167028862bE2a173976CA11").to_checksum(None),
                "token": address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48").to_checksum(None),
                "tokenDecimals": 6
            },
            "recipients": {
                "recipient1": address!("28C6c06298d514Db089934071355E5743bf21d60").to_checksum(None),
                "recipient2": address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266").to_checksum(None)
            },
            "transactions": {
                "tokenTransferAmount": token,
                "ethTransfer1Amount": eth1,
                "ethTransfer2Amount": eth2
            }
        });
        AppConfig::from_json_str(&json.to_string()).unwrap()
    }

    fn interfaces() -> ContractInterfaces {
        ContractInterfaces::from_json_strs(
            include_str!("../abi/multicall.json"),
            include_str!("../abi/smpl_token.json"),
        )
        .unwrap()
    }

    #[test]
    fn test_call_order_and_values() {
        let config = config("2.5", "0.1", "0.2");
        let batch = encode_batch(&config, &interfaces()).unwrap();

        assert_eq!(batch.calls.len(), 3);
        assert_eq!(batch.calls[0].target, config.contracts.token);
        assert_eq!(batch.calls[0].value, U256::ZERO);
        let (to, amount) = decode_transfer(&batch.calls[0].data).unwrap();
        assert_eq!(to, config.recipients.recipient1);
        assert_eq!(amount, U256::from(2_500_000u64));

        assert_eq!(batch.calls[1].target, config.recipients.recipient1);
        assert_eq!(batch.calls[1].value, U256::from(100_000_000_000_000_000u64));
        assert!(batch.calls[1].data.is_empty());

        assert_eq!(batch.calls[2].target, config.recipients.recipient2);
        assert_eq!(batch.calls[2].value, U256::from(200_000_000_000_000_000u64));
        assert!(batch.calls[2].data.is_empty());

        assert_eq!(batch.native_value_total(), U256::from(300_000_000_000_000_000u64));
        assert_eq!(&batch.calldata[..4], interfaces().aggregate_selector().as_slice());
        assert_eq!(&batch.calls[0].data[..4], interfaces().transfer_selector().as_slice());
    }

    #[test]
    fn test_always_three_calls() {
        for (token, eth1, eth2) in [("0", "0", "0"), ("1000000", "12.5", "0.000000000000000001")] {
            let batch = encode_batch(&config(token, eth1, eth2), &interfaces()).unwrap();
            let decoded = decode_aggregate(&batch.calldata).unwrap();
            assert_eq!(decoded, batch.calls);
            assert_eq!(decoded.len(), 3);
        }
    }

    #[test]
    fn test_bad_amount() {
        let err = encode_batch(&config("1.0", "abc", "0.2"), &interfaces()).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidAmount { .. }));

        // token uses 6 decimals in this config
        let err = encode_batch(&config("1.0000001", "0.1", "0.2"), &interfaces()).unwrap_err();
        assert!(matches!(err, EncodingError::ExcessPrecision { decimals: 6, .. }));
    }
}
