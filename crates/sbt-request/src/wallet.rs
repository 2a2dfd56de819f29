//! Payment through an injected wallet provider.
//!
//! The provider signs and broadcasts; this module only decides which
//! account pays, how much, and to whom, and renders the outcome.

use crate::platform::Sleep;
use crate::presenter::{short_tx_hash, PaymentControl, Presenter};
use crate::state::AccountCell;
use crate::transaction::{eth_to_wei, TransactionRequest};
use crate::{PageConfig, SbtError};
use alloy::primitives::{Address, U256};
use std::future::Future;
use std::rc::Rc;

pub const CONNECT_FIRST_MESSAGE: &str = "Please connect your wallet";
pub const AMOUNT_PENDING_MESSAGE: &str = "ETH price not available yet. Please try again shortly.";

/// EIP-1193 style wallet provider.
pub trait WalletProvider {
    /// Already-authorized accounts, without prompting (`eth_accounts`).
    fn accounts(&self) -> impl Future<Output = Result<Vec<String>, SbtError>>;

    /// Prompt the user for account access (`eth_requestAccounts`).
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<String>, SbtError>>;

    fn gas_price(&self) -> impl Future<Output = Result<U256, SbtError>>;

    fn estimate_gas(&self, tx: &TransactionRequest) -> impl Future<Output = Result<u64, SbtError>>;

    /// Submit for signing and broadcast; resolves to the transaction hash.
    fn send_transaction(
        &self,
        tx: &TransactionRequest,
    ) -> impl Future<Output = Result<String, SbtError>>;
}

/// Payment controller. Sole writer of the active account.
pub struct WalletPayment<W, P, S> {
    provider: W,
    presenter: P,
    sleeper: S,
    account: AccountCell,
    config: Rc<PageConfig>,
}

impl<W: Clone, P: Clone, S: Clone> Clone for WalletPayment<W, P, S> {
    fn clone(&self) -> Self {
        Self {
            provider: self.provider.clone(),
            presenter: self.presenter.clone(),
            sleeper: self.sleeper.clone(),
            account: self.account.clone(),
            config: Rc::clone(&self.config),
        }
    }
}

impl<W: WalletProvider, P: Presenter, S: Sleep> WalletPayment<W, P, S> {
    pub fn new(
        provider: W,
        presenter: P,
        sleeper: S,
        account: AccountCell,
        config: Rc<PageConfig>,
    ) -> Self {
        Self {
            provider,
            presenter,
            sleeper,
            account,
            config,
        }
    }

    pub fn account(&self) -> Option<String> {
        self.account.get()
    }

    /// Silently pick up an already-authorized account. Renders the pay
    /// control only when one exists.
    pub async fn check_connection(&self) {
        match self.provider.accounts().await {
            Ok(accounts) => {
                if let Some(first) = accounts.first() {
                    self.account.set(Some(first.as_str()));
                    tracing::info!(account = %first, "Wallet already connected");
                    self.render_control();
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Error checking wallet connection");
            }
        }
    }

    /// Prompt for account access and record the first account.
    pub async fn connect(&self) -> Result<String, SbtError> {
        let accounts = self.provider.request_accounts().await.map_err(|e| {
            tracing::warn!(error = %e, "Wallet connection rejected");
            SbtError::ConnectionRejected
        })?;
        let first = accounts.first().ok_or(SbtError::NoAccounts)?.to_lowercase();
        self.account.set(Some(first.as_str()));
        self.render_control();
        Ok(first)
    }

    /// Replace the payment control to match the current account.
    pub fn render_control(&self) {
        let control = match self.account.get() {
            Some(account) => PaymentControl::Pay { account },
            None => PaymentControl::Connect,
        };
        self.presenter.show_payment_control(control);
    }

    /// Provider reported an out-of-band account switch.
    pub fn on_accounts_changed(&self, accounts: &[String]) {
        let first = accounts.first().map(String::as_str);
        tracing::info!(account = ?first, "Wallet accounts changed");
        self.account.set(first);
        self.render_control();
    }

    /// Pay the displayed amount to the recipient. Connects first when no
    /// account is active. Returns the transaction hash on success; every
    /// failure is rendered, never returned.
    pub async fn pay(&self) -> Option<String> {
        if let Err(e) = self.payable_amount() {
            tracing::warn!(error = %e, "Payment refused before a price was shown");
            self.presenter.show_payment_error(AMOUNT_PENDING_MESSAGE);
            return None;
        }

        let from = match self.account.get() {
            Some(account) => account,
            None => match self.connect().await {
                Ok(account) => account,
                Err(e) => {
                    tracing::warn!(error = %e, "Payment aborted without a wallet connection");
                    self.presenter.show_payment_error(CONNECT_FIRST_MESSAGE);
                    return None;
                }
            },
        };

        match self.send_payment(&from).await {
            Ok(tx_hash) => {
                self.announce(&tx_hash).await;
                Some(tx_hash)
            }
            Err(e) => {
                tracing::error!(error = %e, "Transaction failed");
                self.presenter
                    .show_payment_error(&format!("Transaction failed: {e}"));
                None
            }
        }
    }

    /// Build the transfer for `from` and submit it.
    pub async fn send_payment(&self, from: &str) -> Result<String, SbtError> {
        let (amount, value) = self.payable_amount()?;
        let from: Address = from
            .parse()
            .map_err(|e| SbtError::Provider(format!("invalid account {from}: {e}")))?;
        let to = self.config.recipient_address()?;
        let gas_price = self.provider.gas_price().await?;

        let mut tx = TransactionRequest {
            from,
            to,
            value,
            gas: self.config.default_gas,
            gas_price,
        };

        match self.provider.estimate_gas(&tx).await {
            Ok(gas) => tx.gas = gas,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    default_gas = tx.gas,
                    "Gas estimation failed, using default"
                );
            }
        }

        tracing::debug!(amount = %amount, %value, gas = tx.gas, "Submitting payment");
        self.provider.send_transaction(&tx).await
    }

    /// The displayed amount and its wei value. The placeholder shown before
    /// the first quote converts to zero and is refused.
    fn payable_amount(&self) -> Result<(String, U256), SbtError> {
        let amount = self
            .presenter
            .displayed_amount()
            .ok_or_else(|| SbtError::InvalidAmount("no amount displayed".to_string()))?;
        let value = eth_to_wei(&amount)?;
        if value.is_zero() {
            return Err(SbtError::InvalidAmount(format!("{amount} ETH")));
        }
        Ok((amount, value))
    }

    async fn announce(&self, tx_hash: &str) {
        tracing::info!(tx_hash, "Payment sent");
        let notice = self.presenter.show_success(&format!(
            "Payment sent! Transaction: {}...",
            short_tx_hash(tx_hash)
        ));
        self.presenter
            .show_tx_link(&self.config.explorer_tx_url(tx_hash));
        self.sleeper.sleep(self.config.success_dismiss).await;
        self.presenter.dismiss_success(notice);
    }
}
