//! ETH/USD exchange rate, the shared rate cell, and the derived payment amount.

use crate::constants::{AMOUNT_DECIMALS, ESTIMATED_AMOUNT, FALLBACK_ETH_USD, PRICE_USD};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// USD price of one ETH. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    /// Rate used when no quote source answers.
    pub const FALLBACK: ExchangeRate = ExchangeRate(FALLBACK_ETH_USD);

    /// Returns `None` for zero, negative, NaN, or infinite prices.
    pub fn new(usd_per_eth: f64) -> Option<Self> {
        (usd_per_eth.is_finite() && usd_per_eth > 0.0).then_some(Self(usd_per_eth))
    }

    pub fn usd_per_eth(self) -> f64 {
        self.0
    }

    /// ETH owed for the request at this rate.
    pub fn payment_amount(self) -> PaymentAmount {
        PaymentAmount(format!("{:.*}", AMOUNT_DECIMALS, PRICE_USD / self.0))
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ETH amount as the decimal string shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAmount(String);

impl PaymentAmount {
    /// Placeholder shown when no rate has been acquired yet.
    pub fn estimated() -> Self {
        Self(ESTIMATED_AMOUNT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current rate shared across components.
///
/// Stored as the raw bits of an `f64` in one atomic word; `0` means unset.
/// A store is a single assignment, so a refresh cannot tear a concurrent read.
#[derive(Debug, Clone, Default)]
pub struct RateCell {
    bits: Arc<AtomicU64>,
}

impl RateCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<ExchangeRate> {
        match self.bits.load(Ordering::Acquire) {
            0 => None,
            bits => ExchangeRate::new(f64::from_bits(bits)),
        }
    }

    /// Only the price feed writes the rate.
    pub(crate) fn store(&self, rate: ExchangeRate) {
        self.bits.store(rate.0.to_bits(), Ordering::Release);
    }
}
