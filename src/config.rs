// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Network and client configuration.
//!
//! Values come from a TOML file, then environment variables, then whatever
//! the caller sets explicitly (the CLI flags).

use std::{env, fs, path::Path, time::Duration};

use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, StoreError},
    rpc::parse_url,
};

/// Chain id of the Sepolia test network.
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// Address of the `SimpleStore` deployment on Sepolia.
pub const DEPLOYED_ADDRESS: &str = "0x728C467108FD069dB03e270249298Dc10ca355Dc";

/// Used when no contract address is configured at all.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Overrides `contract_address`.
pub const ENV_CONTRACT_ADDRESS: &str = "SIMPLE_STORE_ADDRESS";
/// Overrides `rpc_url`.
pub const ENV_RPC_URL: &str = "SEPOLIA_RPC_URL";
/// Overrides `private_key`.
pub const ENV_PRIVATE_KEY: &str = "PRIVATE_KEY";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "simple-store.toml";
/// Delay between two receipt polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 4_000;

/// Native currency metadata passed to `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    /// Display name.
    pub name: String,
    /// Ticker, e.g. `ETH`.
    pub symbol: String,
    /// Decimals of the smallest unit.
    pub decimals: u8,
}

/// The single network this client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// EIP-155 chain id.
    pub chain_id: u64,
    /// Name shown by wallets.
    pub chain_name: String,
    /// Currency used for gas.
    pub native_currency: NativeCurrency,
    /// Node endpoint, also handed to wallets that add the network.
    pub rpc_url: String,
    /// Explorer base url, without trailing slash.
    pub block_explorer_url: String,
}

impl NetworkConfig {
    /// Sepolia, served by `rpc_url`.
    #[must_use]
    pub fn sepolia(rpc_url: impl Into<String>) -> Self {
        Self {
            chain_id: SEPOLIA_CHAIN_ID,
            chain_name: "Sepolia".to_string(),
            native_currency: NativeCurrency {
                name: "Sepolia ETH".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            rpc_url: rpc_url.into(),
            block_explorer_url: "https://sepolia.etherscan.io".to_string(),
        }
    }

    /// Chain id in the `0x`-prefixed form wallets expect.
    #[must_use]
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// Explorer page of a transaction.
    #[must_use]
    pub fn transaction_url(&self, hash: TxHash) -> String {
        format!("{}/tx/{hash}", self.block_explorer_url.trim_end_matches('/'))
    }
}

/// On-disk configuration. Every field is optional so that the file, the
/// environment and the command line can each provide part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Deployed contract.
    pub contract_address: Option<String>,
    /// Sepolia node endpoint.
    pub rpc_url: Option<String>,
    /// Hex-encoded signing key.
    pub private_key: Option<String>,
    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: Option<u64>,
}

impl FileConfig {
    /// Reads a TOML file.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] if the file cannot be read or holds unknown or
    /// malformed keys.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            StoreError::Config(format!("cannot read {}: {err}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|err| StoreError::Config(format!("{}: {err}", path.display())))
    }

    /// Loads `path` if it exists, otherwise starts empty.
    ///
    /// # Errors
    ///
    /// See [`FileConfig::load`].
    pub fn load_optional(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Fills every field the environment provides.
    #[must_use]
    pub fn merge_env(mut self) -> Self {
        if let Some(value) = non_empty_env(ENV_CONTRACT_ADDRESS) {
            self.contract_address = Some(value);
        }
        if let Some(value) = non_empty_env(ENV_RPC_URL) {
            self.rpc_url = Some(value);
        }
        if let Some(value) = non_empty_env(ENV_PRIVATE_KEY) {
            self.private_key = Some(value);
        }
        self
    }

    /// Applies defaults and validates the endpoint.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] when the RPC url is missing or malformed.
    pub fn resolve(self) -> Result<StoreConfig> {
        let rpc_url = self.rpc_url.ok_or_else(|| {
            StoreError::Config(format!(
                "missing RPC endpoint: set rpc_url or the {ENV_RPC_URL} environment variable"
            ))
        })?;
        parse_url(&rpc_url)?;

        Ok(StoreConfig {
            contract_address: self
                .contract_address
                .unwrap_or_else(|| ZERO_ADDRESS.to_string()),
            network: NetworkConfig::sepolia(rpc_url),
            private_key: self.private_key,
            poll_interval: Duration::from_millis(
                self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS),
            ),
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Fully resolved client configuration.
///
/// The contract address is kept as the raw configured string; it is
/// validated when a contract handle is built so that the failure surfaces
/// as an operation error rather than at start-up.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Contract address as configured.
    pub contract_address: String,
    /// Target network.
    pub network: NetworkConfig,
    /// Signing key for [`crate::LocalWallet`], if any.
    pub private_key: Option<String>,
    /// Delay between two receipt polls.
    pub poll_interval: Duration,
}

impl StoreConfig {
    /// A configuration without signing key and with the default polling
    /// interval.
    #[must_use]
    pub fn new(contract_address: impl Into<String>, network: NetworkConfig) -> Self {
        Self {
            contract_address: contract_address.into(),
            network,
            private_key: None,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Replaces the polling interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("contract_address", &self.contract_address)
            .field("network", &self.network)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

/// Contents written by `simple-store init`.
#[must_use]
pub fn config_template(rpc_url: Option<&str>) -> String {
    format!(
        r#"# SimpleStore client configuration.
#
# Environment variables {ENV_CONTRACT_ADDRESS}, {ENV_RPC_URL} and {ENV_PRIVATE_KEY}
# override the values below.

contract_address = "{DEPLOYED_ADDRESS}"
rpc_url = "{}"

# Hex-encoded secp256k1 key used to sign transactions. Prefer the
# {ENV_PRIVATE_KEY} environment variable over storing it here.
# private_key = "0x..."

poll_interval_ms = {DEFAULT_POLL_INTERVAL_MS}
"#,
        rpc_url.unwrap_or("https://sepolia.infura.io/v3/YOUR_PROJECT_ID")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sepolia_chain_id_hex() {
        let network = NetworkConfig::sepolia("http://localhost:8545");
        assert_eq!(network.chain_id_hex(), "0xaa36a7");
        assert_eq!(
            network.transaction_url(TxHash::ZERO),
            format!("https://sepolia.etherscan.io/tx/0x{}", "0".repeat(64))
        );
    }

    #[test]
    fn missing_rpc_url_is_a_config_error() {
        let err = FileConfig::default().resolve().expect_err("no rpc url");
        assert!(err.to_string().contains(ENV_RPC_URL));
    }

    #[test]
    fn missing_address_falls_back_to_zero_address() {
        let config = FileConfig {
            rpc_url: Some("http://localhost:8545".to_string()),
            ..FileConfig::default()
        }
        .resolve()
        .expect("resolves");
        assert_eq!(config.contract_address, ZERO_ADDRESS);
        assert_eq!(config.poll_interval, Duration::from_millis(4_000));
    }

    #[test]
    fn template_round_trips_through_the_loader() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, config_template(Some("http://localhost:8545"))).expect("write");

        let config = FileConfig::load(&path).expect("loads");
        assert_eq!(config.contract_address.as_deref(), Some(DEPLOYED_ADDRESS));
        assert_eq!(config.rpc_url.as_deref(), Some("http://localhost:8545"));
        assert_eq!(config.private_key, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "rpc = \"http://localhost\"\n").expect("write");
        assert!(FileConfig::load(&path).is_err());
    }

    #[test]
    fn debug_output_hides_private_key() {
        let mut config = StoreConfig::new(ZERO_ADDRESS, NetworkConfig::sepolia("http://x"));
        config.private_key = Some("0xdeadbeef".to_string());
        assert!(!format!("{config:?}").contains("deadbeef"));
    }
}
