// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use alloy_primitives::U256;

use crate::error::{Result, StoreError};

#[allow(missing_docs)]
mod bindings {
    alloy_sol_types::sol! {
        function getValor() external view returns (uint256);
        function setValor(uint256 value) external;
    }
}

pub use bindings::{getValorCall, setValorCall};

/// Parses user input into a value for the setter.
///
/// Accepts unsigned decimal integers (surrounding whitespace and a leading
/// `+` ignored) up to `2^256 - 1`.
///
/// # Errors
///
/// [`StoreError::InvalidInput`] for empty, negative, non-decimal or
/// out-of-range input.
pub fn parse_value(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(StoreError::invalid_input(input, "please enter a number"));
    }
    if trimmed.starts_with('-') {
        return Err(StoreError::invalid_input(
            input,
            "the stored value cannot be negative",
        ));
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(StoreError::invalid_input(input, "please enter a valid number"));
    }
    U256::from_str_radix(digits, 10)
        .map_err(|_| StoreError::invalid_input(input, "value does not fit in a uint256"))
}
