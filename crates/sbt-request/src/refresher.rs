use crate::platform::Sleep;
use crate::price_feed::PriceFeed;
use crate::quote::QuoteSource;
use futures::future::LocalBoxFuture;
use std::time::Duration;

/// Re-acquires the rate on a fixed period for the life of the page.
///
/// Each acquisition is handed to `spawn` rather than awaited, so a slow
/// quote never delays the next tick. Overlapping acquisitions are allowed;
/// whichever finishes last wins.
pub struct PriceRefresher<P, S, T, F> {
    feed: PriceFeed<P, S>,
    sleeper: T,
    period: Duration,
    spawn: F,
}

impl<P, S, T, F> PriceRefresher<P, S, T, F>
where
    P: QuoteSource + 'static,
    S: QuoteSource + 'static,
    T: Sleep,
    F: Fn(LocalBoxFuture<'static, ()>),
{
    pub fn new(feed: PriceFeed<P, S>, sleeper: T, period: Duration, spawn: F) -> Self {
        Self {
            feed,
            sleeper,
            period,
            spawn,
        }
    }

    /// Wait one period, then start an acquisition.
    pub async fn tick(&self) {
        self.sleeper.sleep(self.period).await;
        tracing::debug!(period_secs = self.period.as_secs(), "Refreshing ETH price");
        let feed = self.feed.clone();
        let task: LocalBoxFuture<'static, ()> = Box::pin(async move {
            feed.acquire_rate().await;
        });
        (self.spawn)(task);
    }

    /// Tick forever.
    pub async fn run(self) {
        loop {
            self.tick().await;
        }
    }
}
