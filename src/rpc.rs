// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! JSON-RPC access to a node.

use std::fmt;

use alloy::providers::{DynProvider, Provider, RootProvider};
use async_trait::async_trait;
use log::{debug, trace};
use serde_json::Value;
use url::Url;

use crate::{
    error::{Result, StoreError, WalletError},
    wallet::Wallet,
};

/// A node endpoint.
///
/// Implements [`Wallet`] by forwarding every request, which is enough for
/// reads and for nodes holding unlocked accounts.
pub struct RpcClient {
    provider: DynProvider,
}

impl fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcClient").finish_non_exhaustive()
    }
}

impl RpcClient {
    /// Prepares a client for `url`. No request is sent.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] when `url` cannot be parsed.
    pub fn new(url: &str) -> Result<Self> {
        let url = parse_url(url)?;
        Ok(Self::from_provider(DynProvider::new(RootProvider::new_http(url))))
    }

    pub(crate) fn from_provider(provider: DynProvider) -> Self {
        Self { provider }
    }

    pub(crate) fn provider(&self) -> &DynProvider {
        &self.provider
    }

    async fn forward(&self, method: &str, params: Value) -> std::result::Result<Value, WalletError> {
        debug!("rpc -> {method}");
        trace!("rpc {method} params: {params}");
        let answer = self
            .provider
            .raw_request::<_, Value>(method.to_owned().into(), params)
            .await
            .map_err(|err| {
                debug!("rpc <- {method} failed: {err}");
                WalletError::from(err)
            })?;
        trace!("rpc {method} answer: {answer}");
        Ok(answer)
    }
}

pub(crate) fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|err| StoreError::Config(format!("invalid RPC url '{url}': {err}")))
}

#[async_trait]
impl Wallet for RpcClient {
    async fn request(&self, method: &str, params: Value) -> std::result::Result<Value, WalletError> {
        match method {
            // Nodes have no permission prompt.
            "eth_requestAccounts" => self.forward("eth_accounts", params).await,
            "wallet_switchEthereumChain" | "wallet_addEthereumChain" => {
                Err(WalletError::unsupported(method))
            }
            _ => self.forward(method, params).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::NetworkConfig, error::UNSUPPORTED_METHOD};

    #[test]
    fn rejects_invalid_url() {
        let err = RpcClient::new("not a url").expect_err("invalid");
        assert!(err.to_string().contains("invalid RPC url"));
    }

    #[tokio::test]
    async fn chain_management_is_not_forwarded() {
        let client = RpcClient::new("http://127.0.0.1:1").expect("valid url");
        let err = client.switch_chain(1).await.expect_err("unsupported");
        assert_eq!(err.code, UNSUPPORTED_METHOD);

        let network = NetworkConfig::sepolia("http://127.0.0.1:1");
        let err = client.add_chain(&network).await.expect_err("unsupported");
        assert_eq!(err.code, UNSUPPORTED_METHOD);
    }

    #[tokio::test]
    async fn unreachable_node_is_an_internal_error() {
        let client = RpcClient::new("http://127.0.0.1:1").expect("valid url");
        let err = client.chain_id().await.expect_err("nothing listens there");
        assert_eq!(err.code, crate::error::INTERNAL_ERROR);
    }
}
