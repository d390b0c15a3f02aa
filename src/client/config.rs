//! Client Configuration - passed from the page (JS object) or the environment

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CONTRACT: &str = "ACCOUNTS_CONTRACT_ADDRESS";
pub const ENV_CHAIN_ID: &str = "ACCOUNTS_CHAIN_ID";
pub const ENV_CHAIN_NAME: &str = "ACCOUNTS_CHAIN_NAME";
pub const ENV_CURRENCY: &str = "ACCOUNTS_CURRENCY";
pub const ENV_POLL_MS: &str = "ACCOUNTS_POLL_MS";

const DEFAULT_POLL_MS: u64 = 1_500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("contract address is not set")]
    MissingContract,
    #[error("confirmation poll interval must be non-zero")]
    ZeroPollInterval,
    #[error("invalid chain id: {0}")]
    InvalidChainId(String),
}

/// The one network this client requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    pub currency_symbol: String,
}

impl Default for NetworkConfig {
    fn default() -> Self { Self::monad_testnet() }
}

impl NetworkConfig {
    pub fn new(chain_id: u64, name: impl Into<String>, currency_symbol: impl Into<String>) -> Self {
        Self { chain_id, name: name.into(), currency_symbol: currency_symbol.into() }
    }

    pub fn monad_testnet() -> Self { Self::new(10143, "Monad Testnet", "MON") }

    /// `0x`-prefixed lowercase hex, as `wallet_switchEthereumChain` expects.
    pub fn chain_id_hex(&self) -> String { format!("0x{:x}", self.chain_id) }
}

/// Parse a chain id given as decimal or `0x` hex.
pub fn parse_chain_id(value: &str) -> Result<u64, ConfigError> {
    let value = value.trim();
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|_| ConfigError::InvalidChainId(value.to_string()))
}

/// Client configuration. The page or host constructs this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    pub network: NetworkConfig,
    pub contract_address: Address,
    /// Receipt polling interval while awaiting confirmation.
    pub confirmation_poll_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { network: NetworkConfig::default(), contract_address: Address::ZERO, confirmation_poll_ms: DEFAULT_POLL_MS }
    }
}

impl ClientConfig {
    pub fn new(contract_address: Address) -> Self {
        Self { contract_address, ..Default::default() }
    }
    pub fn with_network(mut self, network: NetworkConfig) -> Self { self.network = network; self }
    pub fn with_contract(mut self, address: Address) -> Self { self.contract_address = address; self }
    pub fn with_poll_interval(mut self, ms: u64) -> Self { self.confirmation_poll_ms = ms; self }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.contract_address.is_zero() {
            return Err(ConfigError::MissingContract);
        }
        if self.confirmation_poll_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Read overrides from `ACCOUNTS_*` environment variables on top of the defaults.
    #[cfg(feature = "native")]
    pub fn from_env() -> anyhow::Result<Self> {
        use anyhow::Context;
        use std::env;

        let mut config = Self::default();
        if let Ok(address) = env::var(ENV_CONTRACT) {
            config.contract_address = address
                .trim()
                .parse()
                .with_context(|| format!("{ENV_CONTRACT}={address}"))?;
        }
        if let Ok(chain) = env::var(ENV_CHAIN_ID) {
            config.network.chain_id = parse_chain_id(&chain).context(ENV_CHAIN_ID)?;
        }
        if let Ok(name) = env::var(ENV_CHAIN_NAME) {
            config.network.name = name;
        }
        if let Ok(symbol) = env::var(ENV_CURRENCY) {
            config.network.currency_symbol = symbol;
        }
        if let Ok(ms) = env::var(ENV_POLL_MS) {
            config.confirmation_poll_ms = ms.trim().parse().with_context(|| format!("{ENV_POLL_MS}={ms}"))?;
        }
        config.validate()?;
        Ok(config)
    }
}
