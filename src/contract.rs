// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Access to the deployed `SimpleStore` contract.

use std::time::Duration;

use alloy::rpc::types::eth::{TransactionInput, TransactionReceipt, TransactionRequest};
use alloy_primitives::{Address, TxHash, U256};
use alloy_sol_types::SolCall;
use log::{debug, error, info};

use crate::{
    abi::{getValorCall, setValorCall},
    address::parse_address,
    config::StoreConfig,
    error::{Result, StoreError},
    network::check_network,
    wallet::Wallet,
};

/// A contract handle bound to one address and signed by one account.
///
/// Obtained through [`SimpleStore::connect`], which checks every
/// precondition of a call up front.
#[derive(Debug)]
pub struct SimpleStore<'w, W: ?Sized> {
    wallet: &'w W,
    address: Address,
    account: Address,
    poll_interval: Duration,
}

impl<'w, W> SimpleStore<'w, W>
where
    W: Wallet + ?Sized,
{
    /// Builds a handle after checking, in order: that a wallet is present,
    /// that the configured address is well formed (both without touching
    /// the network), that the wallet is on the configured chain and that it
    /// exposes an account.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingWallet`], [`StoreError::InvalidAddress`],
    /// [`StoreError::WrongNetwork`] or [`StoreError::NoAccount`] for the
    /// failed check, [`StoreError::Wallet`] if the wallet cannot answer.
    pub async fn connect(wallet: Option<&'w W>, config: &StoreConfig) -> Result<Self> {
        let wallet = wallet.ok_or(StoreError::MissingWallet)?;
        let address = parse_address(&config.contract_address)?;

        check_network(wallet, &config.network).await?;

        let account = wallet
            .request_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NoAccount)?;
        debug!("contract {address} bound to account {account}");

        Ok(Self {
            wallet,
            address,
            account,
            poll_interval: config.poll_interval,
        })
    }

    /// Contract address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Account transactions are sent from.
    #[must_use]
    pub fn account(&self) -> Address {
        self.account
    }

    /// Reads the stored value.
    ///
    /// # Errors
    ///
    /// [`StoreError::Wallet`] if the call fails, [`StoreError::Decode`] if
    /// the answer is not a single `uint256`.
    pub async fn get_value(&self) -> Result<U256> {
        let data = getValorCall {}.abi_encode();
        let output = self.wallet.call(self.address, data.into()).await?;
        let value = getValorCall::abi_decode_returns(&output)
            .map_err(|err| StoreError::decode("getValor() return data", err))?;
        debug!("{} = {value}", getValorCall::SIGNATURE);
        Ok(value)
    }

    /// Submits a transaction storing `value`. Returns once the wallet has
    /// accepted it, without waiting for confirmation.
    ///
    /// # Errors
    ///
    /// [`StoreError::SubmissionRejected`] with whatever the wallet answered,
    /// including a user rejection (4001).
    pub async fn set_value(&self, value: U256) -> Result<PendingTransaction<'w, W>> {
        let data = setValorCall { value }.abi_encode();
        let tx = TransactionRequest::default()
            .from(self.account)
            .to(self.address)
            .input(TransactionInput::both(data.into()));

        let hash = self.wallet.send_transaction(&tx).await.map_err(|err| {
            error!("submitting {}({value}) failed: {err}", setValorCall::SIGNATURE);
            StoreError::SubmissionRejected(err)
        })?;
        info!("submitted {}({value}) as {hash}", setValorCall::SIGNATURE);

        Ok(PendingTransaction {
            wallet: self.wallet,
            hash,
            poll_interval: self.poll_interval,
        })
    }
}

/// A submitted transaction that has not been observed in a block yet.
#[derive(Debug)]
pub struct PendingTransaction<'w, W: ?Sized> {
    wallet: &'w W,
    hash: TxHash,
    poll_interval: Duration,
}

impl<W> PendingTransaction<'_, W>
where
    W: Wallet + ?Sized,
{
    /// Hash the wallet returned at submission.
    #[must_use]
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// Polls for the receipt until one shows up. There is no timeout; a
    /// dropped transaction keeps this waiting.
    ///
    /// # Errors
    ///
    /// [`StoreError::ConfirmationFailed`] if the transaction reverted or the
    /// receipt could not be fetched.
    pub async fn wait(&self) -> Result<TransactionReceipt> {
        loop {
            let receipt = self
                .wallet
                .transaction_receipt(self.hash)
                .await
                .map_err(|err| self.failed(err.to_string()))?;

            match receipt {
                Some(receipt) if receipt.status() => {
                    info!(
                        "transaction {} confirmed in block {:?}",
                        self.hash, receipt.block_number
                    );
                    return Ok(receipt);
                }
                Some(_) => return Err(self.failed("execution reverted".to_string())),
                None => {
                    debug!("transaction {} still pending", self.hash);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    fn failed(&self, reason: String) -> StoreError {
        error!("transaction {} failed: {reason}", self.hash);
        StoreError::ConfirmationFailed {
            hash: self.hash,
            reason,
        }
    }
}
