//! # Delegated Multicall
//!
//! Builds, signs and submits a single EIP-7702 (type 4) transaction that lets
//! an externally-owned account borrow a multicall contract's code for one
//! transaction and execute several calls atomically.
//!
//! ## Core Features
//!
//! - **Calldata Encoding**
//!   - ERC20 `transfer` plus two native transfers
//!   - Single `aggregate((address,uint256,bytes)[])` payload
//!   - Exact decimal amount scaling, no floating point
//!
//! - **Authorization**
//!   - EIP-7702 tuple bound to the multicall contract
//!   - Nonce set to the account nonce + 1
//!
//! - **Transaction**
//!   - Self-call type 4 envelope with fixed gas and fee caps
//!   - Local signing and EIP-2718 encoding
//!
//! - **Submission**
//!   - Single broadcast, single receipt wait, no retries
//!   - Revert reason decoding for rejected transactions
//!
//! ## Features
//!
//! - `rustls-tls`: Uses rustls as the TLS implementation instead of native-tls (OpenSSL).
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use delegated_multicall::{connect, AppConfig, BatchPipeline, ContractInterfaces};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = AppConfig::load("config.json")?;
//! let interfaces = ContractInterfaces::load("abi/multicall.json", "abi/smpl_token.json")?;
//! let client = connect(&config.rpc_url(None)?).await?;
//!
//! let key = std::env::var("PRIVATE_KEY").ok();
//! let mut pipeline = BatchPipeline::new(&config, &interfaces, client);
//! let confirmation = pipeline
//!     .run(key.as_deref(), Some(Duration::from_secs(120)))
//!     .await?;
//!
//! println!(
//!     "confirmed in block {:?}, gas used {}",
//!     confirmation.block_number, confirmation.gas_used
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `config`: JSON configuration loading and validation
//! - `encoder`: Sub-call construction and `aggregate` encoding
//! - `authorization`: Key loading and EIP-7702 tuple signing
//! - `transaction`: Type 4 assembly and signing
//! - `submitter`: Broadcast and receipt wait
//! - `pipeline`: Stage tracking across the whole run
//! - `client`: Alloy provider implementation of `ChainClient`
//! - `traits`: The `ChainClient` network seam
//! - `types`: Core data structures
//! - `errors`: Error types and handling
//! - `utils`: ABI, amount and revert helpers

pub mod types;
pub mod config;
pub mod encoder;
pub mod authorization;
pub mod transaction;
pub mod submitter;
pub mod pipeline;
pub mod client;
pub mod traits;
pub mod errors;
pub mod utils;

// Re-export only the essential types and functions
pub use client::{connect, ProviderClient};
pub use errors::{BatchError, ConfigError, EncodingError, SigningError, SubmissionError};
pub use pipeline::{BatchPipeline, PreparedBatch};
pub use traits::ChainClient;
pub use types::{AppConfig, Confirmation, SignedBatch, Stage};
pub use utils::abi_utils::ContractInterfaces;
