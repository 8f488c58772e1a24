// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Error types shared by every operation of the crate.

use std::fmt;

use alloy::transports::TransportError;
use alloy_primitives::TxHash;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The user rejected the request.
pub const USER_REJECTED: i64 = 4001;
/// The requested method or account has not been authorized by the user.
pub const UNAUTHORIZED: i64 = 4100;
/// The wallet does not support the requested method.
pub const UNSUPPORTED_METHOD: i64 = 4200;
/// The requested chain has not been added to the wallet.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;
/// Malformed request parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC internal error, also used for transport failures.
pub const INTERNAL_ERROR: i64 = -32603;

/// An error reported by a wallet or node in answer to a request.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (code {code})")]
pub struct WalletError {
    /// EIP-1193 or JSON-RPC error code.
    pub code: i64,
    /// Human-readable reason, shown to the user as is.
    pub message: String,
}

impl WalletError {
    /// An error with an arbitrary code.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// What a wallet answers when the user dismisses its prompt.
    #[must_use]
    pub fn user_rejected() -> Self {
        Self::new(USER_REJECTED, "User rejected the request.")
    }

    /// The wallet does not implement `method`.
    #[must_use]
    pub fn unsupported(method: &str) -> Self {
        Self::new(
            UNSUPPORTED_METHOD,
            format!("method {method} is not supported"),
        )
    }

    /// The request parameters could not be understood.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    /// A failure that is not the user's doing, such as a dropped connection.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    /// Whether the wallet reported the chain as unknown (4902).
    #[must_use]
    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == UNRECOGNIZED_CHAIN
    }
}

impl From<TransportError> for WalletError {
    /// Keeps the node's error object when there is one.
    fn from(err: TransportError) -> Self {
        match err.as_error_resp() {
            Some(payload) => Self::new(payload.code, payload.message.to_string()),
            None => Self::internal(err.to_string()),
        }
    }
}

/// Discriminant of a [`StoreError`], for callers that branch on the failure
/// without caring about its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`StoreError::MissingWallet`].
    MissingWallet,
    /// See [`StoreError::WrongNetwork`].
    WrongNetwork,
    /// See [`StoreError::NetworkSwitchRejected`].
    NetworkSwitchRejected,
    /// See [`StoreError::NetworkAddRejected`].
    NetworkAddRejected,
    /// See [`StoreError::InvalidAddress`].
    InvalidAddress,
    /// See [`StoreError::InvalidInput`].
    InvalidInput,
    /// See [`StoreError::SubmissionRejected`].
    SubmissionRejected,
    /// See [`StoreError::ConfirmationFailed`].
    ConfirmationFailed,
    /// See [`StoreError::NoAccount`].
    NoAccount,
    /// See [`StoreError::Wallet`].
    Wallet,
    /// See [`StoreError::Decode`].
    Decode,
    /// See [`StoreError::Config`].
    Config,
    /// See [`StoreError::Key`].
    Key,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Every way an operation can fail. None of them is retried automatically.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No wallet was detected.
    #[error("no wallet found; install a browser wallet or configure a private key")]
    MissingWallet,

    /// The wallet is on another chain than the configured one.
    #[error("wrong network: expected chain id {expected}, wallet is on {actual}")]
    WrongNetwork {
        /// Configured chain id.
        expected: u64,
        /// Chain id the wallet reported.
        actual: u64,
    },

    /// The wallet refused to switch networks.
    #[error("could not switch to the {network} network: {source}")]
    NetworkSwitchRejected {
        /// Name of the target network.
        network: String,
        /// What the wallet answered.
        #[source]
        source: WalletError,
    },

    /// The wallet refused to register the network.
    #[error("could not add the {network} network to the wallet: {source}")]
    NetworkAddRejected {
        /// Name of the target network.
        network: String,
        /// What the wallet answered.
        #[source]
        source: WalletError,
    },

    /// The configured contract address is malformed.
    #[error("invalid contract address '{address}': {reason}")]
    InvalidAddress {
        /// The address as configured.
        address: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The value to store is not an unsigned 256-bit decimal integer.
    #[error("invalid input '{input}': {reason}")]
    InvalidInput {
        /// The raw input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The wallet did not accept the transaction.
    #[error("transaction rejected: {0}")]
    SubmissionRejected(#[source] WalletError),

    /// The transaction was submitted but did not succeed.
    #[error("transaction {hash} was not confirmed: {reason}")]
    ConfirmationFailed {
        /// Hash returned at submission.
        hash: TxHash,
        /// Revert or transport failure.
        reason: String,
    },

    /// The wallet granted access but exposed no account.
    #[error("the wallet did not expose any account")]
    NoAccount,

    /// Any other wallet or node failure.
    #[error("wallet request failed: {0}")]
    Wallet(#[from] WalletError),

    /// An answer could not be decoded.
    #[error("could not decode {what}: {reason}")]
    Decode {
        /// What was being decoded.
        what: &'static str,
        /// Decoder message.
        reason: String,
    },

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The signing key could not be loaded.
    #[error("invalid private key: {0}")]
    Key(String),
}

impl StoreError {
    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingWallet => ErrorKind::MissingWallet,
            Self::WrongNetwork { .. } => ErrorKind::WrongNetwork,
            Self::NetworkSwitchRejected { .. } => ErrorKind::NetworkSwitchRejected,
            Self::NetworkAddRejected { .. } => ErrorKind::NetworkAddRejected,
            Self::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::SubmissionRejected(_) => ErrorKind::SubmissionRejected,
            Self::ConfirmationFailed { .. } => ErrorKind::ConfirmationFailed,
            Self::NoAccount => ErrorKind::NoAccount,
            Self::Wallet(_) => ErrorKind::Wallet,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Config(_) => ErrorKind::Config,
            Self::Key(_) => ErrorKind::Key,
        }
    }

    pub(crate) fn decode(what: &'static str, reason: impl fmt::Display) -> Self {
        Self::Decode {
            what,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_input(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_address(address: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::rpc::json_rpc::ErrorPayload;

    use super::*;

    #[test]
    fn kind_matches_variant() {
        let err = StoreError::WrongNetwork {
            expected: 11_155_111,
            actual: 1,
        };
        assert_eq!(err.kind(), ErrorKind::WrongNetwork);
        assert!(err.to_string().contains("11155111"));

        let err = StoreError::SubmissionRejected(WalletError::user_rejected());
        assert_eq!(err.kind(), ErrorKind::SubmissionRejected);
        assert!(err.to_string().contains("User rejected"));
    }

    #[test]
    fn wallet_error_deserializes_from_rpc_payload() {
        let err: WalletError =
            serde_json::from_str(r#"{"code":4902,"message":"Unrecognized chain ID"}"#)
                .expect("valid payload");
        assert!(err.is_unrecognized_chain());
    }

    #[test]
    fn node_error_objects_keep_their_code() {
        let payload: ErrorPayload =
            serde_json::from_str(r#"{"code":-32000,"message":"nonce too low"}"#)
                .expect("valid payload");
        let err = WalletError::from(TransportError::ErrorResp(payload));
        assert_eq!(err, WalletError::new(-32000, "nonce too low"));

        let err = WalletError::from(TransportError::local_usage_str("no connection"));
        assert_eq!(err.code, INTERNAL_ERROR);
    }
}
