//! Core of the Soulbound Token request page.
//!
//! A user enters a Farcaster ID, sees the ETH amount worth one US dollar at
//! the current ETH/USD rate, and can pay it through an injected wallet.
//! Nothing is minted here; the page only previews and forwards a payment.
//!
//! # Components
//!
//! - [`PriceFeed`]: CoinMarketCap, then CoinGecko, then a constant
//! - [`PreviewForm`]: identifier validation, amount preview, copy button
//! - [`WalletPayment`]: connect, build the transfer, hand it to the wallet
//! - [`PriceRefresher`]: re-acquires the rate every five minutes
//!
//! Components talk to the page only through ports ([`Presenter`],
//! [`Clipboard`], [`Sleep`], [`HttpFetch`], [`WalletProvider`]), so all of
//! this runs and tests natively. The browser shell lives in
//! `sbt-request-app`.

// Core types
pub mod constants;
pub mod error;
pub mod identifier;
pub mod rate;
pub mod state;
pub mod transaction;

// Ports
pub mod platform;
pub mod presenter;

// Components
pub mod preview;
pub mod price_feed;
pub mod quote;
pub mod refresher;
pub mod wallet;

#[cfg(test)]
mod test_support;

// Re-exports
pub use constants::PageConfig;
pub use constants::*;
pub use error::SbtError;
pub use identifier::FarcasterId;
pub use platform::{Clipboard, Sleep};
pub use presenter::{NoticeId, PaymentControl, Presenter};
pub use preview::PreviewForm;
pub use price_feed::{PriceFeed, RateOrigin};
pub use quote::{CoinGecko, CoinMarketCap, HttpFetch, HttpResponse, QuoteSource};
pub use rate::{ExchangeRate, PaymentAmount, RateCell};
pub use refresher::PriceRefresher;
pub use state::{AccountCell, AppState};
pub use transaction::TransactionRequest;
pub use wallet::{WalletPayment, WalletProvider};
