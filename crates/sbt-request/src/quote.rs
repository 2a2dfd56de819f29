//! ETH/USD quote sources.
//!
//! - [`CoinMarketCap`]: authenticated, nested `data.ETH.quote.USD.price`
//! - [`CoinGecko`]: public, flat `ethereum.usd`
//!
//! Both sit on an [`HttpFetch`] transport so the browser shell can use
//! `fetch` and tests can script responses.

use crate::constants::COINMARKETCAP_KEY_HEADER;
use crate::SbtError;
use serde::Deserialize;
use std::future::Future;

/// Raw HTTP response as seen by a quote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal GET transport.
pub trait HttpFetch {
    /// Issue a GET with the given extra headers. Transport failures are
    /// `Err`; any HTTP status is `Ok`.
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<HttpResponse, SbtError>>;
}

/// A provider of the USD price of one ETH.
pub trait QuoteSource {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the current price. Any failure, including a non-positive
    /// price, is an error.
    fn fetch_usd(&self) -> impl Future<Output = Result<f64, SbtError>>;
}

#[derive(Deserialize)]
struct CmcEnvelope {
    data: CmcData,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct CmcData {
    eth: CmcAsset,
}

#[derive(Deserialize)]
struct CmcAsset {
    quote: CmcQuotes,
}

#[derive(Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct CmcQuotes {
    usd: CmcQuote,
}

#[derive(Deserialize)]
struct CmcQuote {
    price: f64,
}

#[derive(Deserialize)]
struct GeckoPrices {
    ethereum: GeckoQuote,
}

#[derive(Deserialize)]
struct GeckoQuote {
    usd: f64,
}

/// Extract the ETH price from a CoinMarketCap `quotes/latest` body.
pub fn parse_coinmarketcap(body: &str) -> Result<f64, SbtError> {
    let envelope: CmcEnvelope = serde_json::from_str(body)?;
    Ok(envelope.data.eth.quote.usd.price)
}

/// Extract the ETH price from a CoinGecko `simple/price` body.
pub fn parse_coingecko(body: &str) -> Result<f64, SbtError> {
    let prices: GeckoPrices = serde_json::from_str(body)?;
    Ok(prices.ethereum.usd)
}

fn check_price(source_name: &'static str, price: f64) -> Result<f64, SbtError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(SbtError::quote(source_name, format!("unusable price {price}")))
    }
}

async fn fetch_and_parse<F: HttpFetch>(
    fetcher: &F,
    source_name: &'static str,
    url: &str,
    headers: &[(&str, &str)],
    parse: fn(&str) -> Result<f64, SbtError>,
) -> Result<f64, SbtError> {
    let resp = fetcher.get(url, headers).await?;
    if !resp.is_success() {
        return Err(SbtError::quote(
            source_name,
            format!("API error: {}", resp.status),
        ));
    }
    let price = parse(&resp.body)
        .map_err(|e| SbtError::quote(source_name, format!("invalid response format: {e}")))?;
    check_price(source_name, price)
}

/// Primary source. Requires an API key; without one it fails immediately
/// so the feed moves on to the next tier without a wasted request.
#[derive(Debug, Clone)]
pub struct CoinMarketCap<F> {
    fetcher: F,
    url: String,
    api_key: String,
}

impl<F: HttpFetch> CoinMarketCap<F> {
    pub fn new(fetcher: F, url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
            api_key: api_key.into(),
        }
    }
}

impl<F: HttpFetch> QuoteSource for CoinMarketCap<F> {
    fn name(&self) -> &'static str {
        "coinmarketcap"
    }

    async fn fetch_usd(&self) -> Result<f64, SbtError> {
        if self.api_key.is_empty() {
            return Err(SbtError::Config("no CoinMarketCap API key configured".to_string()));
        }
        fetch_and_parse(
            &self.fetcher,
            self.name(),
            &self.url,
            &[(COINMARKETCAP_KEY_HEADER, self.api_key.as_str())],
            parse_coinmarketcap,
        )
        .await
    }
}

/// Secondary source, unauthenticated.
#[derive(Debug, Clone)]
pub struct CoinGecko<F> {
    fetcher: F,
    url: String,
}

impl<F: HttpFetch> CoinGecko<F> {
    pub fn new(fetcher: F, url: impl Into<String>) -> Self {
        Self {
            fetcher,
            url: url.into(),
        }
    }
}

impl<F: HttpFetch> QuoteSource for CoinGecko<F> {
    fn name(&self) -> &'static str {
        "coingecko"
    }

    async fn fetch_usd(&self) -> Result<f64, SbtError> {
        fetch_and_parse(&self.fetcher, self.name(), &self.url, &[], parse_coingecko).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedFetch;

    const CMC_BODY: &str = r#"{
        "status": {"error_code": 0},
        "data": {"ETH": {"id": 1027, "symbol": "ETH",
            "quote": {"USD": {"price": 2512.34, "volume_24h": 1.0}}}}
    }"#;

    #[test]
    fn test_parse_coinmarketcap() {
        assert_eq!(parse_coinmarketcap(CMC_BODY).unwrap(), 2512.34);
        assert!(parse_coinmarketcap(r#"{"data": {"ETH": {"quote": {}}}}"#).is_err());
        assert!(parse_coinmarketcap(r#"{"status": {"error_code": 1002}}"#).is_err());
    }

    #[test]
    fn test_parse_coingecko() {
        assert_eq!(
            parse_coingecko(r#"{"ethereum": {"usd": 2400.5}}"#).unwrap(),
            2400.5
        );
        assert!(parse_coingecko(r#"{"bitcoin": {"usd": 60000}}"#).is_err());
        assert!(parse_coingecko("not json").is_err());
    }

    #[tokio::test]
    async fn test_coinmarketcap_sends_key_header() {
        let fetch = ScriptedFetch::new().respond("coinmarketcap", 200, CMC_BODY);
        let source = CoinMarketCap::new(fetch.clone(), "https://coinmarketcap.test/q", "k3y");

        assert_eq!(source.fetch_usd().await.unwrap(), 2512.34);

        let calls = fetch.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://coinmarketcap.test/q");
        assert_eq!(
            calls[0].1,
            vec![(COINMARKETCAP_KEY_HEADER.to_string(), "k3y".to_string())]
        );
    }

    #[tokio::test]
    async fn test_coinmarketcap_without_key_skips_request() {
        let fetch = ScriptedFetch::new().respond("coinmarketcap", 200, CMC_BODY);
        let source = CoinMarketCap::new(fetch.clone(), "https://coinmarketcap.test/q", "");

        assert!(matches!(source.fetch_usd().await, Err(SbtError::Config(_))));
        assert!(fetch.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_failure() {
        let fetch = ScriptedFetch::new().respond("coinmarketcap", 401, CMC_BODY);
        let source = CoinMarketCap::new(fetch, "https://coinmarketcap.test/q", "k3y");

        let err = source.fetch_usd().await.unwrap_err();
        assert!(err.to_string().contains("API error: 401"), "{err}");
    }

    #[tokio::test]
    async fn test_zero_price_is_failure() {
        let fetch = ScriptedFetch::new().respond("coingecko", 200, r#"{"ethereum": {"usd": 0}}"#);
        let source = CoinGecko::new(fetch, "https://coingecko.test/p");

        assert!(matches!(
            source.fetch_usd().await,
            Err(SbtError::Quote { source_name: "coingecko", .. })
        ));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let fetch = ScriptedFetch::new();
        let source = CoinGecko::new(fetch, "https://coingecko.test/p");

        assert!(matches!(source.fetch_usd().await, Err(SbtError::Http(_))));
    }
}
