// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::str::FromStr;

use alloy_primitives::Address;

use crate::error::{Result, StoreError};

/// Parses `0x` followed by 40 hex digits.
///
/// All-lowercase and all-uppercase inputs are accepted as is. Mixed-case
/// input must carry a valid EIP-55 checksum.
///
/// # Errors
///
/// [`StoreError::InvalidAddress`] when the input is empty, lacks the prefix,
/// has the wrong length or fails the checksum.
pub fn parse_address(input: &str) -> Result<Address> {
    if input.is_empty() {
        return Err(StoreError::invalid_address(input, "address is empty"));
    }
    let digits = input
        .strip_prefix("0x")
        .ok_or_else(|| StoreError::invalid_address(input, "missing 0x prefix"))?;
    if digits.len() != 40 {
        return Err(StoreError::invalid_address(
            input,
            format!("expected 40 hex digits, found {}", digits.len()),
        ));
    }

    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    let parsed = if has_lower && has_upper {
        Address::parse_checksummed(input, None).map_err(|err| err.to_string())
    } else {
        Address::from_str(input).map_err(|err| err.to_string())
    };
    parsed.map_err(|reason| StoreError::invalid_address(input, reason))
}

/// `0x1234...abcd`, as shown on the connect button.
#[must_use]
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
