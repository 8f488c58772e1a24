// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Client for the `SimpleStore` contract: one `uint256` on Sepolia, read with
//! `getValor()` and written with `setValor(uint256)`.
//!
//! Every operation goes through a [`Wallet`], an EIP-1193 style request
//! capability handed in by the caller. [`LocalWallet`] signs with a key held
//! by the process; a browser integration supplies its own implementation.
//!
//! ```no_run
//! use simple_store::{config::FileConfig, LocalWallet, SimpleStore, U256};
//!
//! # async fn example() -> simple_store::Result<()> {
//! let config = FileConfig::default().merge_env().resolve()?;
//! let key = config.private_key.clone().unwrap_or_default();
//! let wallet = LocalWallet::from_hex_key(&key, &config.network.rpc_url)?;
//!
//! let store = SimpleStore::connect(Some(&wallet), &config).await?;
//! let pending = store.set_value(U256::from(42u64)).await?;
//! pending.wait().await?;
//! assert_eq!(store.get_value().await?, U256::from(42u64));
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unused_must_use)]
#![deny(unused_extern_crates)]
#![deny(clippy::pedantic)]
#![warn(missing_debug_implementations, unreachable_pub, rustdoc::all)]

/// Contract bindings and input parsing.
pub mod abi;
/// Address parsing and display helpers.
pub mod address;
pub mod bridge;
pub mod config;
pub mod contract;
pub mod error;
pub mod network;
pub mod rpc;
/// Contract schema types and the `SimpleStore` interface.
pub mod schema;
pub mod wallet;

pub use address::{parse_address, short_address};
pub use alloy_primitives::{Address, Bytes, TxHash, U256};
pub use bridge::{Bridge, Event, UiState};
pub use contract::{PendingTransaction, SimpleStore};
pub use error::{ErrorKind, Result, StoreError, WalletError};
pub use network::{ensure_network, NetworkOutcome};
pub use rpc::RpcClient;
pub use wallet::{LocalWallet, Wallet};
