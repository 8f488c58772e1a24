// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Network assurance: make the wallet use the target chain before any call.

use log::{error, info, warn};

use crate::{
    config::NetworkConfig,
    error::{Result, StoreError},
    wallet::Wallet,
};

/// How the wallet ended up on the target network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkOutcome {
    /// The wallet already knew the network and switched to it.
    Switched,
    /// The network had to be registered with the wallet first.
    Added,
}

impl NetworkOutcome {
    /// Transient notification text for the outcome.
    #[must_use]
    pub fn notification(self, network: &NetworkConfig) -> String {
        match self {
            Self::Switched => format!("Connected to the {} network", network.chain_name),
            Self::Added => format!("{} network added and activated", network.chain_name),
        }
    }
}

/// Asks the wallet to switch to `network`, registering it first if the
/// wallet reports it as unknown (error 4902).
///
/// # Errors
///
/// [`StoreError::NetworkSwitchRejected`] or [`StoreError::NetworkAddRejected`]
/// with the wallet's answer.
pub async fn ensure_network<W>(wallet: &W, network: &NetworkConfig) -> Result<NetworkOutcome>
where
    W: Wallet + ?Sized,
{
    let switch_error = match wallet.switch_chain(network.chain_id).await {
        Ok(()) => {
            info!("wallet switched to {} ({})", network.chain_name, network.chain_id);
            return Ok(NetworkOutcome::Switched);
        }
        Err(err) => err,
    };

    if !switch_error.is_unrecognized_chain() {
        error!("switching to {} failed: {switch_error}", network.chain_name);
        return Err(StoreError::NetworkSwitchRejected {
            network: network.chain_name.clone(),
            source: switch_error,
        });
    }

    warn!(
        "wallet does not know {} ({}), registering it",
        network.chain_name,
        network.chain_id_hex()
    );
    if let Err(err) = wallet.add_chain(network).await {
        error!("adding {} failed: {err}", network.chain_name);
        return Err(StoreError::NetworkAddRejected {
            network: network.chain_name.clone(),
            source: err,
        });
    }

    // Most wallets activate an added chain, but not all of them do.
    wallet
        .switch_chain(network.chain_id)
        .await
        .map_err(|err| {
            error!("switching to freshly added {} failed: {err}", network.chain_name);
            StoreError::NetworkSwitchRejected {
                network: network.chain_name.clone(),
                source: err,
            }
        })?;

    info!("{} added to the wallet and activated", network.chain_name);
    Ok(NetworkOutcome::Added)
}

/// Fails with [`StoreError::WrongNetwork`] unless the wallet is on `network`.
/// Never asks the wallet to switch.
///
/// # Errors
///
/// [`StoreError::WrongNetwork`], or [`StoreError::Wallet`] if the chain id
/// cannot be read.
pub async fn check_network<W>(wallet: &W, network: &NetworkConfig) -> Result<()>
where
    W: Wallet + ?Sized,
{
    let actual = wallet.chain_id().await?;
    if actual != network.chain_id {
        warn!(
            "wallet is on chain {actual}, expected {} ({})",
            network.chain_id, network.chain_name
        );
        return Err(StoreError::WrongNetwork {
            expected: network.chain_id,
            actual,
        });
    }
    Ok(())
}
