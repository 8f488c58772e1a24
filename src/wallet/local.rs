// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::{fmt, str::FromStr};

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    rpc::types::eth::TransactionRequest,
};
use alloy_primitives::{Address, U64};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use log::{debug, info};
use serde_json::{json, Value};

use super::Wallet;
use crate::{
    error::{StoreError, WalletError, UNAUTHORIZED, UNRECOGNIZED_CHAIN},
    rpc::{parse_url, RpcClient},
};

/// A private key held by this process, in front of a node.
///
/// Plays the part of the browser wallet for the command-line tool: it
/// exposes a single account, signs `eth_sendTransaction` locally and relays
/// everything else to the node. Nonce, fees and chain id of a signed
/// transaction come from the node.
pub struct LocalWallet {
    address: Address,
    node: RpcClient,
}

impl fmt::Debug for LocalWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

impl LocalWallet {
    /// Loads a hex-encoded secp256k1 key (with or without `0x`) and binds it
    /// to the node at `rpc_url`. No request is sent.
    ///
    /// # Errors
    ///
    /// [`StoreError::Key`] for a malformed key, [`StoreError::Config`] for a
    /// malformed url.
    pub fn from_hex_key(key: &str, rpc_url: &str) -> Result<Self, StoreError> {
        let signer =
            PrivateKeySigner::from_str(key.trim()).map_err(|err| StoreError::Key(err.to_string()))?;
        let url = parse_url(rpc_url)?;

        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        Ok(Self {
            address,
            node: RpcClient::from_provider(provider),
        })
    }

    /// The only account this wallet exposes.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    async fn answer_switch_chain(&self, params: &Value) -> Result<Value, WalletError> {
        let requested = params
            .get(0)
            .and_then(|p| p.get("chainId"))
            .cloned()
            .ok_or_else(|| WalletError::invalid_params("missing chainId"))?;
        let requested: U64 = serde_json::from_value(requested)
            .map_err(|err| WalletError::invalid_params(format!("invalid chainId: {err}")))?;
        let requested: u64 = requested.to();

        let served = self.node.provider().get_chain_id().await?;
        if served == requested {
            Ok(Value::Null)
        } else {
            Err(WalletError::new(
                UNRECOGNIZED_CHAIN,
                format!("node serves chain {served}, not {requested}"),
            ))
        }
    }

    async fn sign_and_relay(&self, params: &Value) -> Result<Value, WalletError> {
        let tx = params
            .get(0)
            .cloned()
            .ok_or_else(|| WalletError::invalid_params("missing transaction object"))?;
        let tx: TransactionRequest = serde_json::from_value(tx)
            .map_err(|err| WalletError::invalid_params(err.to_string()))?;

        if let Some(requested) = tx.from {
            if requested != self.address {
                return Err(WalletError::new(
                    UNAUTHORIZED,
                    format!("account {requested} is not managed by this wallet"),
                ));
            }
        }
        let tx = tx.from(self.address);
        debug!("signing transaction {tx:?}");

        let pending = self.node.provider().send_transaction(tx).await?;
        let hash = *pending.tx_hash();
        info!("relayed transaction {hash} from {}", self.address);
        Ok(json!(hash))
    }
}

#[async_trait]
impl Wallet for LocalWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        match method {
            "eth_accounts" | "eth_requestAccounts" => Ok(json!([self.address])),
            "wallet_switchEthereumChain" => self.answer_switch_chain(&params).await,
            "eth_sendTransaction" => self.sign_and_relay(&params).await,
            "wallet_addEthereumChain" | "eth_sign" | "personal_sign" | "eth_signTypedData_v4" => {
                Err(WalletError::unsupported(method))
            }
            _ => self.node.request(method, params).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::NetworkConfig,
        error::{ErrorKind, INVALID_PARAMS, UNSUPPORTED_METHOD},
    };

    fn wallet() -> LocalWallet {
        LocalWallet::from_hex_key(&"46".repeat(32), "http://127.0.0.1:1").expect("valid")
    }

    #[test]
    fn derives_the_account_from_the_key() {
        let expected =
            Address::from_str("0x9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f").expect("valid");
        assert_eq!(wallet().address(), expected);

        let prefixed = LocalWallet::from_hex_key(&format!("0x{}", "46".repeat(32)), "http://x")
            .expect("valid");
        assert_eq!(prefixed.address(), expected);
    }

    #[test]
    fn rejects_malformed_keys() {
        for key in ["", "0x1234", "zz"] {
            let err = LocalWallet::from_hex_key(key, "http://127.0.0.1:1").expect_err("invalid");
            assert_eq!(err.kind(), ErrorKind::Key, "key {key:?}");
        }
    }

    #[tokio::test]
    async fn exposes_its_own_account_without_a_node() {
        let wallet = wallet();
        let accounts = wallet.request_accounts().await.expect("accounts");
        assert_eq!(accounts, vec![wallet.address()]);
    }

    #[tokio::test]
    async fn refuses_to_add_networks() {
        let network = NetworkConfig::sepolia("http://127.0.0.1:1");
        let err = wallet().add_chain(&network).await.expect_err("unsupported");
        assert_eq!(err.code, UNSUPPORTED_METHOD);
    }

    #[tokio::test]
    async fn rejects_foreign_sender_before_touching_the_node() {
        let err = wallet()
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": format!("0x{}", "11".repeat(20)),
                    "to": format!("0x{}", "22".repeat(20)),
                    "data": "0x",
                }]),
            )
            .await
            .expect_err("foreign account");
        assert_eq!(err.code, UNAUTHORIZED);
    }

    #[tokio::test]
    async fn oversized_chain_id_in_switch_request_is_invalid() {
        let err = wallet()
            .request(
                "wallet_switchEthereumChain",
                json!([{ "chainId": "0x10000000000000000" }]),
            )
            .await
            .expect_err("does not fit in 64 bits");
        assert_eq!(err.code, INVALID_PARAMS);
    }
}
