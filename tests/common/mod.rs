// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Scripted in-memory wallet standing in for a browser extension.

#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use alloy_sol_types::SolCall;
use async_trait::async_trait;
use serde_json::{json, Value};
use simple_store::{
    abi::{getValorCall, setValorCall},
    config::{NetworkConfig, StoreConfig, DEPLOYED_ADDRESS, SEPOLIA_CHAIN_ID},
    error::{INVALID_PARAMS, UNRECOGNIZED_CHAIN},
    parse_address, Address, Bytes, TxHash, Wallet, WalletError, U256,
};

pub const MAINNET: u64 = 1;

pub fn account() -> Address {
    Address::repeat_byte(0xa1)
}

pub fn contract() -> Address {
    parse_address(DEPLOYED_ADDRESS).expect("valid address")
}

pub fn config() -> StoreConfig {
    config_with_address(DEPLOYED_ADDRESS)
}

pub fn config_with_address(address: &str) -> StoreConfig {
    StoreConfig::new(address, NetworkConfig::sepolia("https://rpc.sepolia.example"))
        .with_poll_interval(Duration::from_millis(1))
}

#[derive(Debug)]
pub struct MockState {
    pub chain_id: u64,
    pub known_chains: HashSet<u64>,
    pub accounts: Vec<Address>,
    pub contract: Address,
    pub stored: U256,
    /// Every method requested, in order.
    pub calls: Vec<String>,
    pub switch_error: Option<WalletError>,
    pub add_error: Option<WalletError>,
    pub send_error: Option<WalletError>,
    /// `None` answers to `eth_getTransactionReceipt` before the receipt.
    pub pending_polls: usize,
    /// Whether receipts report success; `false` means reverted.
    pub receipt_status: bool,
    pub receipt_error: Option<WalletError>,
    pub added_chain: Option<Value>,
    pending: HashMap<TxHash, U256>,
    next_tx: u64,
}

#[derive(Debug)]
pub struct MockWallet {
    state: Mutex<MockState>,
}

impl MockWallet {
    pub fn on_chain(chain_id: u64) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(MockState {
                chain_id,
                known_chains: [MAINNET, SEPOLIA_CHAIN_ID].into_iter().collect(),
                accounts: vec![account()],
                contract: contract(),
                stored: U256::ZERO,
                calls: Vec::new(),
                switch_error: None,
                add_error: None,
                send_error: None,
                pending_polls: 0,
                receipt_status: true,
                receipt_error: None,
                added_chain: None,
                pending: HashMap::new(),
                next_tx: 1,
            }),
        })
    }

    pub fn sepolia() -> Arc<Self> {
        Self::on_chain(SEPOLIA_CHAIN_ID)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().expect("mock state lock");
        f(&mut state)
    }

    pub fn calls(&self) -> Vec<String> {
        self.with(|state| state.calls.clone())
    }

    /// Calls other than the chain id and account queries.
    pub fn contract_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| {
                matches!(
                    call.as_str(),
                    "eth_call" | "eth_sendTransaction" | "eth_getTransactionReceipt"
                )
            })
            .collect()
    }

    pub fn stored(&self) -> U256 {
        self.with(|state| state.stored)
    }

    fn answer(state: &mut MockState, method: &str, params: &Value) -> Result<Value, WalletError> {
        match method {
            "eth_requestAccounts" | "eth_accounts" => Ok(json!(state.accounts)),
            "eth_chainId" => Ok(json!(format!("0x{:x}", state.chain_id))),
            "wallet_switchEthereumChain" => {
                if let Some(err) = state.switch_error.clone() {
                    return Err(err);
                }
                let requested = chain_param(params)?;
                if !state.known_chains.contains(&requested) {
                    return Err(WalletError::new(
                        UNRECOGNIZED_CHAIN,
                        "Unrecognized chain ID. Try adding the chain using wallet_addEthereumChain first.",
                    ));
                }
                state.chain_id = requested;
                Ok(Value::Null)
            }
            "wallet_addEthereumChain" => {
                if let Some(err) = state.add_error.clone() {
                    return Err(err);
                }
                let requested = chain_param(params)?;
                state.known_chains.insert(requested);
                state.added_chain = params.get(0).cloned();
                Ok(Value::Null)
            }
            "eth_call" => {
                let call = &params[0];
                let to: Address = field(call, "to")?;
                if to != state.contract {
                    return Ok(json!("0x"));
                }
                let data: Bytes = field(call, "data")?;
                if data.as_ref() == getValorCall::SELECTOR.as_slice() {
                    Ok(json!(Bytes::from(state.stored.to_be_bytes::<32>().to_vec())))
                } else {
                    Err(WalletError::new(3, "execution reverted"))
                }
            }
            "eth_sendTransaction" => {
                if let Some(err) = state.send_error.clone() {
                    return Err(err);
                }
                let tx = &params[0];
                let data: Bytes = field(tx, "input").or_else(|_| field(tx, "data"))?;
                let call = setValorCall::abi_decode(&data)
                    .map_err(|_| WalletError::new(-32000, "unexpected calldata"))?;
                let hash = TxHash::left_padding_from(&state.next_tx.to_be_bytes());
                state.next_tx += 1;
                state.pending.insert(hash, call.value);
                Ok(json!(hash))
            }
            "eth_getTransactionReceipt" => {
                if let Some(err) = state.receipt_error.clone() {
                    return Err(err);
                }
                if state.pending_polls > 0 {
                    state.pending_polls -= 1;
                    return Ok(Value::Null);
                }
                let hash: TxHash = serde_json::from_value(params[0].clone())
                    .map_err(|err| WalletError::new(INVALID_PARAMS, err.to_string()))?;
                let Some(value) = state.pending.remove(&hash) else {
                    return Ok(Value::Null);
                };
                if state.receipt_status {
                    state.stored = value;
                }
                let from = state.accounts.first().copied().unwrap_or_default();
                Ok(receipt(hash, from, state.contract, state.receipt_status))
            }
            "eth_getBalance" => Ok(json!("0xde0b6b3a7640000")),
            _ => Err(WalletError::unsupported(method)),
        }
    }
}

fn field<T: serde::de::DeserializeOwned>(object: &Value, name: &str) -> Result<T, WalletError> {
    let value = object
        .get(name)
        .cloned()
        .ok_or_else(|| WalletError::new(INVALID_PARAMS, format!("missing {name}")))?;
    serde_json::from_value(value).map_err(|err| WalletError::new(INVALID_PARAMS, err.to_string()))
}

fn chain_param(params: &Value) -> Result<u64, WalletError> {
    let raw = params[0]["chainId"]
        .as_str()
        .ok_or_else(|| WalletError::new(INVALID_PARAMS, "missing chainId"))?;
    u64::from_str_radix(raw.trim_start_matches("0x"), 16)
        .map_err(|err| WalletError::new(INVALID_PARAMS, err.to_string()))
}

/// A legacy receipt as a node returns it.
fn receipt(hash: TxHash, from: Address, to: Address, success: bool) -> Value {
    json!({
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "ab".repeat(32)),
        "blockNumber": "0x10",
        "from": from,
        "to": to,
        "cumulativeGasUsed": "0x6a2c",
        "gasUsed": "0x6a2c",
        "effectiveGasPrice": "0x3b9aca00",
        "contractAddress": null,
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
    })
}

#[async_trait]
impl Wallet for MockWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        self.with(|state| {
            state.calls.push(method.to_string());
            Self::answer(state, method, &params)
        })
    }
}
