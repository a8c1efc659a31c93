//! Utility functions for building the batch transaction
//!
//! # Modules
//!
//! - [`abi_utils`]: Contract interface descriptors
//!   - Static `sol!` bindings for `aggregate` and `transfer`
//!   - Load-time validation of the JSON ABI files
//!   - Fail-closed calldata decoding
//!
//! - [`amount_utils`]: Decimal amount handling
//!   - Exact string to smallest-unit scaling
//!   - Display formatting
//!
//! - [`error_utils`]: Revert handling
//!   - `Error(string)` and `Panic(uint256)` decoding
//!   - Revert data extraction from JSON-RPC errors
//!
//! # Example
//!
//! ```no_run
//! use delegated_multicall::utils::{abi_utils::ContractInterfaces, amount_utils::parse_amount};
//!
//! # fn example() -> anyhow::Result<()> {
//! let interfaces = ContractInterfaces::load("abi/multicall.json", "abi/smpl_token.json")?;
//! let wei = parse_amount("0.1", 18)?;
//! println!("aggregate selector {}, {wei} wei", interfaces.aggregate_selector());
//! # Ok(())
//! # }
//! ```

/// Contract interface descriptors
pub mod abi_utils;

/// Exact amount scaling
pub mod amount_utils;

/// Revert reason decoding
pub mod error_utils;
