//! Revert reason extraction for rejected transactions
//!
//! Nodes that simulate a transaction before accepting it may answer
//! `eth_sendRawTransaction` with a JSON-RPC error carrying revert data.
//! This module turns that data into a readable reason:
//! - `Error(string)` reverts (selector 0x08c379a0)
//! - `Panic(uint256)` codes (selector 0x4e487b71)
//! - Unknown custom errors, reported by selector

use alloy::{sol_types::decode_revert_reason, transports::TransportError};

/// Decode raw revert output into a human-readable reason
///
/// # Returns
/// * `Some(String)` - Decoded message, panic description or custom error selector
/// * `None` - Output is shorter than a selector
pub fn revert_reason(output: &[u8]) -> Option<String> {
    if output.len() < 4 {
        return None;
    }
    decode_revert_reason(output)
        .or_else(|| Some(format!("custom error 0x{}", alloy::hex::encode(&output[..4]))))
}

/// Extract a revert reason from a JSON-RPC error response, if it carries one
pub fn rpc_revert_reason(error: &TransportError) -> Option<String> {
    let payload = error.as_error_resp()?;
    let data = payload.as_revert_data()?;
    revert_reason(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::hex::decode;

    #[test]
    fn test_error_string() {
        // "Insufficient balance" encoded as Error(string)
        let error_bytes = decode(
            "08c379a0\
             0000000000000000000000000000000000000000000000000000000000000020\
             0000000000000000000000000000000000000000000000000000000000000014\
             496e73756666696369656e742062616c616e6365000000000000000000000000",
        )
        .unwrap();

        let reason = revert_reason(&error_bytes).unwrap();
        assert!(reason.contains("Insufficient balance"), "{reason}");
    }

    #[test]
    fn test_panic() {
        let mut panic_bytes = vec![0x4e, 0x48, 0x7b, 0x71];
        panic_bytes.extend_from_slice(&[0u8; 31]);
        panic_bytes.push(0x11);

        let reason = revert_reason(&panic_bytes).unwrap();
        assert!(reason.to_lowercase().contains("overflow"), "{reason}");
    }

    #[test]
    fn test_unknown_selector() {
        assert_eq!(
            revert_reason(&[0xde, 0xad, 0xbe, 0xef]),
            Some("custom error 0xdeadbeef".to_string())
        );
    }

    #[test]
    fn test_short_input() {
        assert_eq!(revert_reason(&[]), None);
        assert_eq!(revert_reason(&[0x08, 0xc3, 0x79]), None);
    }
}
