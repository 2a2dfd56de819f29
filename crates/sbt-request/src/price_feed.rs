//! Two-tier ETH/USD acquisition with a constant floor.

use crate::quote::QuoteSource;
use crate::rate::{ExchangeRate, RateCell};
use std::fmt;
use std::rc::Rc;

/// Which tier produced the current rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateOrigin {
    Primary,
    Secondary,
    Fallback,
}

impl fmt::Display for RateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RateOrigin::Primary => "primary",
            RateOrigin::Secondary => "secondary",
            RateOrigin::Fallback => "fallback",
        })
    }
}

/// Owns the rate cell. Cheap to clone; clones share sources and cell.
pub struct PriceFeed<P, S> {
    primary: Rc<P>,
    secondary: Rc<S>,
    rate: RateCell,
    fallback: ExchangeRate,
}

impl<P, S> Clone for PriceFeed<P, S> {
    fn clone(&self) -> Self {
        Self {
            primary: Rc::clone(&self.primary),
            secondary: Rc::clone(&self.secondary),
            rate: self.rate.clone(),
            fallback: self.fallback,
        }
    }
}

impl<P: QuoteSource, S: QuoteSource> PriceFeed<P, S> {
    /// `fallback_usd` must be positive; anything else is replaced by
    /// [`FALLBACK_ETH_USD`](crate::constants::FALLBACK_ETH_USD).
    pub fn new(primary: P, secondary: S, rate: RateCell, fallback_usd: f64) -> Self {
        let fallback = ExchangeRate::new(fallback_usd).unwrap_or_else(|| {
            tracing::warn!(fallback_usd, "Ignoring unusable fallback rate");
            ExchangeRate::FALLBACK
        });
        Self {
            primary: Rc::new(primary),
            secondary: Rc::new(secondary),
            rate,
            fallback,
        }
    }

    /// Read-only view of the rate this feed writes.
    pub fn rate(&self) -> &RateCell {
        &self.rate
    }

    /// Resolve a rate, store it, and return it. Never fails: each failed
    /// tier is logged and the next one is tried.
    pub async fn acquire_rate(&self) -> ExchangeRate {
        let (rate, origin) = self.resolve().await;
        self.rate.store(rate);
        tracing::info!(rate = rate.usd_per_eth(), %origin, "ETH price updated");
        rate
    }

    async fn resolve(&self) -> (ExchangeRate, RateOrigin) {
        match self.primary.fetch_usd().await {
            Ok(usd) => {
                if let Some(rate) = ExchangeRate::new(usd) {
                    return (rate, RateOrigin::Primary);
                }
                tracing::error!(source = self.primary.name(), usd, "Unusable ETH price");
            }
            Err(e) => {
                tracing::error!(
                    source = self.primary.name(),
                    error = %e,
                    "Failed to fetch ETH price"
                );
            }
        }

        match self.secondary.fetch_usd().await {
            Ok(usd) => {
                if let Some(rate) = ExchangeRate::new(usd) {
                    return (rate, RateOrigin::Secondary);
                }
                tracing::error!(
                    source = self.secondary.name(),
                    usd,
                    "Unusable ETH price from fallback"
                );
            }
            Err(e) => {
                tracing::error!(
                    source = self.secondary.name(),
                    error = %e,
                    "Failed to fetch ETH price from fallback"
                );
            }
        }

        (self.fallback, RateOrigin::Fallback)
    }
}
