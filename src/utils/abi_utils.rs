//! Contract interface descriptors
//!
//! The multicall and token interfaces are declared statically with `sol!` and
//! checked against the JSON ABI files shipped alongside the binary when they
//! are loaded. A [`ContractInterfaces`] value therefore only exists once both
//! ABIs are known to expose the functions the pipeline encodes, and encoding
//! never has to look functions up by name at call time.

use std::{fs, path::Path};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Selector, U256},
    sol,
    sol_types::SolCall,
};

use crate::errors::{ConfigError, EncodingError};

mod interfaces {
    use alloy::sol;

    sol! {
        /// One sub-call executed by the multicall contract
        #[derive(Debug, PartialEq, Eq)]
        struct Call {
            address target;
            uint256 value;
            bytes data;
        }

        interface IMulticall {
            function aggregate(Call[] calldata calls)
                external
                payable
                returns (uint256 blockNumber, bytes[] memory returnData);
        }
    }
}

pub use interfaces::{Call, IMulticall};

// ERC20 interface, only the function the batch encodes
sol! {
    interface IERC20 {
        function transfer(address to, uint256 amount) external returns (bool);
    }
}

/// Statically-typed view of the two contract ABIs
///
/// Holds the selectors that were found in the loaded ABIs; construction fails
/// if either function is missing or has a different parameter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractInterfaces {
    aggregate: Selector,
    transfer: Selector,
}

impl ContractInterfaces {
    /// Load both ABI files from disk
    ///
    /// # Arguments
    /// * `multicall_path` - JSON ABI of the multicall contract
    /// * `token_path` - JSON ABI of the ERC20 token
    ///
    /// # Returns
    /// * `Ok(ContractInterfaces)` - Both ABIs expose the expected functions
    /// * `Err(BatchError::Config)` - A file is unreadable or not a JSON ABI
    /// * `Err(BatchError::Encoding)` - A required function is missing
    pub fn load(
        multicall_path: impl AsRef<Path>,
        token_path: impl AsRef<Path>,
    ) -> Result<Self, crate::errors::BatchError> {
        let multicall = read_abi(multicall_path.as_ref())?;
        let token = read_abi(token_path.as_ref())?;
        Ok(Self::from_json_strs(&multicall, &token)?)
    }

    /// Build from in-memory JSON ABI documents
    pub fn from_json_strs(
        multicall: &str,
        token: &str,
    ) -> Result<Self, crate::errors::BatchError> {
        let multicall = parse_abi("multicall", multicall)?;
        let token = parse_abi("token", token)?;
        Ok(Self::from_abis(&multicall, &token)?)
    }

    /// Validate parsed ABIs against the static descriptors
    pub fn from_abis(multicall: &JsonAbi, token: &JsonAbi) -> Result<Self, EncodingError> {
        let aggregate = require_function::<IMulticall::aggregateCall>("multicall", multicall)?;
        let transfer = require_function::<IERC20::transferCall>("token", token)?;
        Ok(Self { aggregate, transfer })
    }

    /// Selector of `aggregate((address,uint256,bytes)[])`
    pub fn aggregate_selector(&self) -> Selector {
        self.aggregate
    }

    /// Selector of `transfer(address,uint256)`
    pub fn transfer_selector(&self) -> Selector {
        self.transfer
    }
}

fn read_abi(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_abi(name: &str, json: &str) -> Result<JsonAbi, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Abi {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

/// Find the overload of `C` in `abi` by selector
fn require_function<C: SolCall>(contract: &str, abi: &JsonAbi) -> Result<Selector, EncodingError> {
    let expected = Selector::from(C::SELECTOR);
    let name = C::SIGNATURE.split('(').next().unwrap_or(C::SIGNATURE);
    abi.function(name)
        .into_iter()
        .flatten()
        .map(|function| function.selector())
        .find(|selector| *selector == expected)
        .ok_or_else(|| EncodingError::MissingFunction {
            contract: contract.to_string(),
            signature: C::SIGNATURE.to_string(),
        })
}

/// Encode `transfer(to, amount)` under the token ABI's selector
pub fn encode_transfer(interfaces: &ContractInterfaces, to: Address, amount: U256) -> Vec<u8> {
    encode_with(interfaces.transfer, &IERC20::transferCall { to, amount })
}

/// Encode `aggregate(calls)` under the multicall ABI's selector
pub fn encode_aggregate(interfaces: &ContractInterfaces, calls: Vec<Call>) -> Vec<u8> {
    encode_with(interfaces.aggregate, &IMulticall::aggregateCall { calls })
}

fn encode_with<C: SolCall>(selector: Selector, call: &C) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + call.abi_encoded_size());
    out.extend_from_slice(selector.as_slice());
    call.abi_encode_raw(&mut out);
    out
}

/// Decode `aggregate` calldata back into its sub-calls
///
/// Fails on a foreign selector or a body that does not match the schema.
pub fn decode_aggregate(data: &[u8]) -> Result<Vec<Call>, EncodingError> {
    IMulticall::aggregateCall::abi_decode(data)
        .map(|call| call.calls)
        .map_err(|e| EncodingError::Decode {
            function: IMulticall::aggregateCall::SIGNATURE,
            reason: e.to_string(),
        })
}

/// Decode `transfer` calldata into `(to, amount)`
pub fn decode_transfer(data: &[u8]) -> Result<(Address, U256), EncodingError> {
    IERC20::transferCall::abi_decode(data)
        .map(|call| (call.to, call.amount))
        .map_err(|e| EncodingError::Decode {
            function: IERC20::transferCall::SIGNATURE,
            reason: e.to_string(),
        })
}
