// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! The page-level component: connect, read and write buttons over an
//! injected wallet, with all visible state held in [`UiState`].
//!
//! State only changes through [`Bridge::apply`], so a renderer can replay
//! the same [`Event`]s it observes and tests can assert on every step.

use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use log::{error, info};

use crate::{
    abi::parse_value,
    address::short_address,
    config::StoreConfig,
    contract::SimpleStore,
    error::{Result, StoreError},
    network::{ensure_network, NetworkOutcome},
    wallet::Wallet,
};

/// How long a toast stays on screen, see [`Bridge::expire_toast`].
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Everything the page displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Connected account, once the user granted access.
    pub account: Option<Address>,
    /// Last value read from the chain, as a decimal string. Empty until the
    /// first successful read.
    pub current_value: String,
    /// Raw contents of the value input box.
    pub input: String,
    /// Set while an operation is in flight; the renderer disables the read
    /// and write buttons.
    pub busy: bool,
    /// Status or error line below the buttons.
    pub message: String,
    /// Transient notification, e.g. after a network switch.
    pub toast: Option<String>,
}

/// Every state transition the bridge performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The wallet exposed this account.
    AccountConnected(Address),
    /// An operation started or finished.
    Busy(bool),
    /// Replaces the status line.
    Message(String),
    /// Empties the status line.
    ClearMessage,
    /// Shows a transient notification.
    Toast(String),
    /// Hides the notification.
    DismissToast,
    /// A value read from the chain.
    ValueLoaded(String),
    /// The user edited the input box.
    InputChanged(String),
}

impl UiState {
    /// Applies one transition.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::AccountConnected(account) => self.account = Some(*account),
            Event::Busy(busy) => self.busy = *busy,
            Event::Message(message) => self.message = message.clone(),
            Event::ClearMessage => self.message.clear(),
            Event::Toast(toast) => self.toast = Some(toast.clone()),
            Event::DismissToast => self.toast = None,
            Event::ValueLoaded(value) => self.current_value = value.clone(),
            Event::InputChanged(input) => self.input = input.clone(),
        }
    }
}

/// Called after every state transition, e.g. to re-render.
pub type Listener = Box<dyn FnMut(&Event, &UiState) + Send>;

fn dispatch(state: &mut UiState, listener: &mut Option<Listener>, event: Event) {
    state.apply(&event);
    if let Some(listener) = listener {
        listener(&event, state);
    }
}

/// Result of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Transaction that stored the value.
    pub hash: TxHash,
    /// Value read back after confirmation.
    pub value: String,
}

/// Connect, read and write actions over an optional wallet.
pub struct Bridge<W> {
    wallet: Option<W>,
    config: StoreConfig,
    state: UiState,
    listener: Option<Listener>,
}

impl<W: std::fmt::Debug> std::fmt::Debug for Bridge<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("wallet", &self.wallet)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl<W: Wallet> Bridge<W> {
    /// `wallet` is `None` when no wallet was detected.
    #[must_use]
    pub fn new(wallet: Option<W>, config: StoreConfig) -> Self {
        Self {
            wallet,
            config,
            state: UiState::default(),
            listener: None,
        }
    }

    /// Registers the callback invoked after every transition, replacing the
    /// previous one.
    pub fn on_change(&mut self, listener: impl FnMut(&Event, &UiState) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Current display state.
    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Applies `event` and notifies the listener.
    pub fn apply(&mut self, event: Event) {
        dispatch(&mut self.state, &mut self.listener, event);
    }

    /// Mirrors the value input box.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.apply(Event::InputChanged(input.into()));
    }

    /// Hides the toast, if any.
    pub fn dismiss_toast(&mut self) {
        self.apply(Event::DismissToast);
    }

    /// Hides the toast once it has been visible for [`TOAST_DURATION`].
    /// Returns whether a toast was dismissed. The renderer calls this from
    /// its timer with the time elapsed since the toast appeared.
    pub fn expire_toast(&mut self, shown_for: Duration) -> bool {
        if self.state.toast.is_none() || shown_for < TOAST_DURATION {
            return false;
        }
        self.dismiss_toast();
        true
    }

    /// The connected account as `0x1234...abcd`.
    #[must_use]
    pub fn short_account(&self) -> Option<String> {
        self.state.account.as_ref().map(short_address)
    }

    /// Connect button label.
    #[must_use]
    pub fn connect_label(&self) -> String {
        match self.short_account() {
            Some(account) => format!("Connected: {account}"),
            None => "Connect wallet".to_string(),
        }
    }

    /// Requests account access and makes sure the wallet is on the target
    /// network.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingWallet`], [`StoreError::NoAccount`] or a network
    /// assurance failure. The message line reports it as well.
    pub async fn connect(&mut self) -> Result<Address> {
        let result = self.try_connect().await;
        match &result {
            Ok(_) => self.apply(Event::Message("Wallet connected".to_string())),
            Err(err) => self.report("connecting the wallet", err),
        }
        result
    }

    async fn try_connect(&mut self) -> Result<Address> {
        let wallet = self.wallet.as_ref().ok_or(StoreError::MissingWallet)?;

        let account = wallet
            .request_accounts()
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NoAccount)?;
        dispatch(
            &mut self.state,
            &mut self.listener,
            Event::AccountConnected(account),
        );
        info!("connected account {account}");

        let outcome: NetworkOutcome = ensure_network(wallet, &self.config.network).await?;
        let toast = outcome.notification(&self.config.network);
        dispatch(&mut self.state, &mut self.listener, Event::Toast(toast));

        Ok(account)
    }

    /// Reads the stored value into `current_value`.
    ///
    /// # Errors
    ///
    /// Any [`SimpleStore::connect`] or [`SimpleStore::get_value`] failure.
    pub async fn load_value(&mut self) -> Result<String> {
        self.apply(Event::Busy(true));
        self.apply(Event::ClearMessage);

        let result = self.try_load_value().await;
        match &result {
            Ok(value) => self.apply(Event::ValueLoaded(value.clone())),
            Err(err) => self.report("reading the on-chain value", err),
        }

        self.apply(Event::Busy(false));
        result
    }

    async fn try_load_value(&self) -> Result<String> {
        let contract = SimpleStore::connect(self.wallet.as_ref(), &self.config).await?;
        Ok(contract.get_value().await?.to_string())
    }

    /// Writes the current contents of the input box.
    ///
    /// # Errors
    ///
    /// See [`Bridge::write_value`].
    pub async fn write_input(&mut self) -> Result<WriteOutcome> {
        let input = self.state.input.clone();
        self.write_value(&input).await
    }

    /// Validates `input`, submits it and, once confirmed, re-reads the value.
    ///
    /// Invalid input is reported without entering the busy state. The
    /// displayed value is refreshed only after confirmation. If confirmation
    /// fails the message keeps the submitted hash.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidInput`], any [`SimpleStore::connect`] failure,
    /// [`StoreError::SubmissionRejected`] or
    /// [`StoreError::ConfirmationFailed`].
    pub async fn write_value(&mut self, input: &str) -> Result<WriteOutcome> {
        let value = match parse_value(input) {
            Ok(value) => value,
            Err(err) => {
                self.report("storing the value on-chain", &err);
                return Err(err);
            }
        };

        self.apply(Event::Busy(true));
        self.apply(Event::ClearMessage);

        let result = self.try_write_value(value).await;
        if let Err(err) = &result {
            self.report("storing the value on-chain", err);
        }

        self.apply(Event::Busy(false));
        result
    }

    async fn try_write_value(&mut self, value: U256) -> Result<WriteOutcome> {
        let contract = SimpleStore::connect(self.wallet.as_ref(), &self.config).await?;
        let pending = contract.set_value(value).await?;
        let hash = pending.hash();
        dispatch(
            &mut self.state,
            &mut self.listener,
            Event::Message(format!("Transaction sent: {hash}")),
        );

        pending.wait().await?;
        dispatch(
            &mut self.state,
            &mut self.listener,
            Event::Message("Transaction confirmed".to_string()),
        );

        let stored = contract.get_value().await?.to_string();
        dispatch(
            &mut self.state,
            &mut self.listener,
            Event::ValueLoaded(stored.clone()),
        );

        Ok(WriteOutcome {
            hash,
            value: stored,
        })
    }

    fn report(&mut self, action: &str, err: &StoreError) {
        error!("{action} failed ({}): {err}", err.kind());
        let message = match err {
            // The hash stays visible so the user can look the transaction up.
            StoreError::ConfirmationFailed { hash, .. } => {
                format!("Transaction sent: {hash} (not confirmed: {err})")
            }
            _ => format!("Error {action}: {err}"),
        };
        self.apply(Event::Message(message));
    }
}
