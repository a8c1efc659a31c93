// tests/common/mod.rs
#![allow(dead_code)]

use std::{sync::Mutex, time::Duration};

use alloy::{
    primitives::{Address, Bytes, TxHash},
    transports::TransportErrorKind,
};
use delegated_multicall::{
    AppConfig, ChainClient, Confirmation, ContractInterfaces, SubmissionError,
};

/// First default anvil account
pub const PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const CHAIN_ID: u64 = 560048;

pub const MULTICALL: Address = Address::repeat_byte(0x11);
pub const TOKEN: Address = Address::repeat_byte(0xaa);
pub const RECIPIENT_B: Address = Address::repeat_byte(0xbb);
pub const RECIPIENT_C: Address = Address::repeat_byte(0xcc);

/// One recorded JSON-RPC interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcCall {
    ChainId,
    TransactionCount(Address),
    SendRaw(Bytes),
    WaitForReceipt(TxHash),
}

/// How the mocked node answers the broadcast and receipt wait
#[derive(Debug, Clone)]
pub enum Outcome {
    Confirmed { block_number: u64, gas_used: u64 },
    SendFails(String),
    Reverted { block_number: u64 },
}

/// In-memory chain that records every call
pub struct MockClient {
    pub chain_id: u64,
    pub nonce: u64,
    pub outcome: Outcome,
    calls: Mutex<Vec<RpcCall>>,
}

impl MockClient {
    pub fn new(nonce: u64) -> Self {
        Self {
            chain_id: CHAIN_ID,
            nonce,
            outcome: Outcome::Confirmed {
                block_number: 1_234_567,
                gas_used: 98_765,
            },
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    pub fn calls(&self) -> Vec<RpcCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn broadcasts(&self) -> Vec<Bytes> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RpcCall::SendRaw(raw) => Some(raw),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RpcCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ChainClient for MockClient {
    async fn chain_id(&self) -> Result<u64, SubmissionError> {
        self.record(RpcCall::ChainId);
        Ok(self.chain_id)
    }

    async fn transaction_count(&self, address: Address) -> Result<u64, SubmissionError> {
        self.record(RpcCall::TransactionCount(address));
        Ok(self.nonce)
    }

    async fn send_raw_transaction(&self, raw: &[u8]) -> Result<TxHash, SubmissionError> {
        self.record(RpcCall::SendRaw(Bytes::copy_from_slice(raw)));
        match &self.outcome {
            Outcome::SendFails(message) => Err(TransportErrorKind::custom_str(message).into()),
            _ => Ok(alloy::primitives::keccak256(raw)),
        }
    }

    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        _timeout: Option<Duration>,
    ) -> Result<Confirmation, SubmissionError> {
        self.record(RpcCall::WaitForReceipt(tx_hash));
        match self.outcome {
            Outcome::Confirmed { block_number, gas_used } => Ok(Confirmation {
                tx_hash,
                block_number: Some(block_number),
                gas_used,
            }),
            Outcome::Reverted { block_number } => Err(SubmissionError::Reverted {
                tx_hash,
                block_number: Some(block_number),
                gas_used: 21_000,
            }),
            Outcome::SendFails(_) => unreachable!("receipt wait after failed broadcast"),
        }
    }
}

/// Configuration with token A, recipients B and C and the given amounts
pub fn config_with_amounts(token: &str, eth1: &str, eth2: &str) -> AppConfig {
    let json = serde_json::json!({
        "network": {
            "chainId": CHAIN_ID,
            "chainName": "Hoodi",
            "nativeCurrency": { "name": "Hoodi Ether", "symbol": "ETH", "decimals": 18 },
            "rpcUrls": ["http://localhost:8545"],
            "blockExplorerUrls": ["https://hoodi.etherscan.io"]
        },
        "contracts": {
            "multicall": MULTICALL.to_checksum(None),
            "token": TOKEN.to_checksum(None)
        },
        "recipients": {
            "recipient1": RECIPIENT_B.to_checksum(None),
            "recipient2": RECIPIENT_C.to_checksum(None)
        },
        "transactions": {
            "tokenTransferAmount": token,
            "ethTransfer1Amount": eth1,
            "ethTransfer2Amount": eth2
        }
    });
    AppConfig::from_json_str(&json.to_string()).expect("valid test config")
}

pub fn test_config() -> AppConfig {
    config_with_amounts("1.0", "0.1", "0.2")
}

pub fn interfaces() -> ContractInterfaces {
    let dir = env!("CARGO_MANIFEST_DIR");
    ContractInterfaces::load(
        format!("{dir}/abi/multicall.json"),
        format!("{dir}/abi/smpl_token.json"),
    )
    .expect("bundled ABIs are valid")
}
