//! Configuration loading
//!
//! Reads the JSON document describing the network, contract addresses,
//! recipients and amounts, and validates it before any stage runs:
//! - every required key must be present with the right type
//! - addresses must carry a valid EIP-55 checksum
//! - decimal counts must be usable for unit scaling

use std::{fs, path::Path};

use alloy::primitives::{Address, TxHash};
use serde::{de::Error as _, Deserialize, Deserializer};

use crate::{errors::ConfigError, types::AppConfig};

/// Largest power of ten representable in a `U256`
const MAX_DECIMALS: u8 = 77;

/// Deserialize an address, rejecting anything that is not EIP-55 checksummed
pub(crate) fn checksummed<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Address::parse_checksummed(&raw, None)
        .map_err(|e| D::Error::custom(format!("invalid address {raw:?}: {e}")))
}

impl AppConfig {
    /// Load and validate the configuration file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse and validate a configuration document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.network.native_currency.decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "network.nativeCurrency.decimals",
                reason: format!("{} exceeds {MAX_DECIMALS}", self.network.native_currency.decimals),
            });
        }
        if self.contracts.token_decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidValue {
                field: "contracts.tokenDecimals",
                reason: format!("{} exceeds {MAX_DECIMALS}", self.contracts.token_decimals),
            });
        }
        if self.gas.max_priority_fee_per_gas > self.gas.max_fee_per_gas {
            return Err(ConfigError::InvalidValue {
                field: "gas.maxPriorityFeePerGas",
                reason: "must not exceed maxFeePerGas".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve the RPC endpoint
    ///
    /// A non-empty `override_url` (typically from the environment) wins,
    /// otherwise the first entry of `network.rpcUrls` is used.
    pub fn rpc_url(&self, override_url: Option<&str>) -> Result<String, ConfigError> {
        override_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .or_else(|| self.network.rpc_urls.first().map(String::as_str))
            .map(str::to_string)
            .ok_or(ConfigError::NoRpcUrl)
    }

    /// Block explorer link for a transaction, if an explorer is configured
    pub fn explorer_tx_url(&self, tx_hash: &TxHash) -> Option<String> {
        self.network
            .block_explorer_urls
            .first()
            .map(|base| format!("{}/tx/{tx_hash}", base.trim_end_matches('/')))
    }
}
