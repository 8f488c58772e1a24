// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The wallet capability.
//!
//! A wallet is anything that answers EIP-1193 style requests: a browser
//! extension reached through a JS bridge, a node with unlocked accounts
//! ([`crate::rpc::RpcClient`]) or a local signing key in front of a node
//! ([`LocalWallet`]). Operations receive the wallet as a value instead of
//! looking it up globally, so tests substitute a scripted double.

mod local;

use std::sync::Arc;

use alloy::rpc::types::eth::{TransactionReceipt, TransactionRequest};
use alloy_primitives::{Address, Bytes, TxHash, U256, U64};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

pub use local::LocalWallet;

use crate::{config::NetworkConfig, error::WalletError};

/// EIP-1193 request interface.
///
/// Only [`Wallet::request`] is required; the typed helpers build the
/// parameters and decode the answers of the methods the client uses. An
/// answer of the wrong shape is reported as an internal error.
#[async_trait]
pub trait Wallet: Send + Sync {
    /// Sends one request and returns the `result` member of the answer.
    ///
    /// # Errors
    ///
    /// The error object the wallet or node answered with, or an internal
    /// error when it could not be reached.
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;

    /// Asks the user to expose their accounts.
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let answer = self.request("eth_requestAccounts", json!([])).await?;
        decode("eth_requestAccounts", answer)
    }

    /// Chain the wallet currently signs for.
    async fn chain_id(&self) -> Result<u64, WalletError> {
        let answer = self.request("eth_chainId", json!([])).await?;
        let chain_id: U64 = decode("eth_chainId", answer)?;
        Ok(chain_id.to())
    }

    /// `wallet_switchEthereumChain` (EIP-3326).
    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        self.request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": format!("0x{chain_id:x}") }]),
        )
        .await?;
        Ok(())
    }

    /// `wallet_addEthereumChain` (EIP-3085).
    async fn add_chain(&self, network: &NetworkConfig) -> Result<(), WalletError> {
        self.request(
            "wallet_addEthereumChain",
            json!([{
                "chainId": network.chain_id_hex(),
                "chainName": network.chain_name,
                "nativeCurrency": network.native_currency,
                "rpcUrls": [network.rpc_url],
                "blockExplorerUrls": [network.block_explorer_url],
            }]),
        )
        .await?;
        Ok(())
    }

    /// Executes a read-only call against the latest block.
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, WalletError> {
        let answer = self
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        decode("eth_call", answer)
    }

    /// Submits a transaction and returns its hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, WalletError> {
        let answer = self.request("eth_sendTransaction", json!([tx])).await?;
        decode("eth_sendTransaction", answer)
    }

    /// `None` while the transaction is still pending.
    async fn transaction_receipt(
        &self,
        hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, WalletError> {
        let answer = self
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?;
        decode("eth_getTransactionReceipt", answer)
    }

    /// Balance of `account` in wei.
    async fn balance(&self, account: Address) -> Result<U256, WalletError> {
        let answer = self
            .request("eth_getBalance", json!([account, "latest"]))
            .await?;
        decode("eth_getBalance", answer)
    }
}

#[async_trait]
impl<W: Wallet + ?Sized> Wallet for Arc<W> {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        (**self).request(method, params).await
    }
}

fn decode<T: DeserializeOwned>(method: &str, answer: Value) -> Result<T, WalletError> {
    serde_json::from_value(answer)
        .map_err(|err| WalletError::internal(format!("{method} returned an unexpected answer: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answers every request with the same value.
    struct Fixed(Value);

    #[async_trait]
    impl Wallet for Fixed {
        async fn request(&self, _method: &str, _params: Value) -> Result<Value, WalletError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn accounts_are_case_insensitive() {
        let wallet = Fixed(json!(["0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"]));
        let accounts = wallet.request_accounts().await.expect("decodes");
        assert_eq!(accounts.len(), 1);
    }

    #[tokio::test]
    async fn chain_id_decodes_quantities() {
        let wallet = Fixed(json!("0xaa36a7"));
        assert_eq!(wallet.chain_id().await.expect("decodes"), 11_155_111);

        let wallet = Fixed(json!("0xffffffffffffffff"));
        assert_eq!(wallet.chain_id().await.expect("decodes"), u64::MAX);
    }

    #[tokio::test]
    async fn chain_id_beyond_64_bits_is_an_error() {
        let wallet = Fixed(json!("0x10000000000000000"));
        let err = wallet.chain_id().await.expect_err("too large");
        assert_eq!(err.code, crate::error::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn missing_receipt_means_pending() {
        let wallet = Fixed(Value::Null);
        let receipt = wallet
            .transaction_receipt(TxHash::ZERO)
            .await
            .expect("decodes");
        assert!(receipt.is_none());
    }
}
