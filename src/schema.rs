// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Schema of the `SimpleStore` contract interface.
//!
//! The contract is deployed and maintained elsewhere; this module only
//! records the two functions the client is allowed to call.

use alloy_primitives::hex;
use alloy_sol_types::SolCall;
use serde::{Serialize, Serializer};

use crate::abi::{getValorCall, setValorCall};

/// Schema for a contract function.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionSchema {
    /// Name used by this crate.
    pub name: &'static str,
    /// Solidity signature the selector is derived from.
    pub signature: &'static str,
    /// First four bytes of the Keccak-256 hash of the signature.
    #[serde(serialize_with = "serialize_selector")]
    pub selector: [u8; 4],
    /// Documentation string.
    pub doc: &'static str,
    /// Input ABI type (or "()" for no input).
    pub input: &'static str,
    /// Output ABI type (or "()" for no output).
    pub output: &'static str,
    /// Whether calling this function changes contract state.
    pub mutates: bool,
}

fn serialize_selector<S: Serializer>(selector: &[u8; 4], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode_prefixed(selector))
}

/// Complete schema for a contract.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ContractSchema {
    /// Contract name.
    pub name: &'static str,
    /// List of contract functions.
    pub functions: &'static [FunctionSchema],
}

impl ContractSchema {
    /// Returns an iterator over all functions.
    pub fn iter_functions(&self) -> impl Iterator<Item = &FunctionSchema> {
        self.functions.iter()
    }

    /// Find a function by name.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&FunctionSchema> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Find a function by its four-byte selector.
    #[must_use]
    pub fn get_by_selector(&self, selector: [u8; 4]) -> Option<&FunctionSchema> {
        self.functions.iter().find(|f| f.selector == selector)
    }
}

/// Reads the stored value.
pub const GET_VALUE: FunctionSchema = FunctionSchema {
    name: "get_value",
    signature: getValorCall::SIGNATURE,
    selector: getValorCall::SELECTOR,
    doc: "Returns the stored value.",
    input: "()",
    output: "uint256",
    mutates: false,
};

/// Replaces the stored value.
pub const SET_VALUE: FunctionSchema = FunctionSchema {
    name: "set_value",
    signature: setValorCall::SIGNATURE,
    selector: setValorCall::SELECTOR,
    doc: "Stores a new value.",
    input: "uint256",
    output: "()",
    mutates: true,
};

/// The `SimpleStore` interface.
pub const SIMPLE_STORE: ContractSchema = ContractSchema {
    name: "SimpleStore",
    functions: &[GET_VALUE, SET_VALUE],
};
