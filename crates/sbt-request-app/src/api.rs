//! Quote transport and compile-time page configuration.

use gloo_net::http::Request;
use sbt::{HttpFetch, HttpResponse, PageConfig, SbtError};

/// CoinMarketCap key. Empty means the page goes straight to CoinGecko.
/// Set at compile time via SBT_CMC_API_KEY.
const CMC_API_KEY: &str = {
    match option_env!("SBT_CMC_API_KEY") {
        Some(key) => key,
        None => "",
    }
};

/// Page configuration with compile-time overrides applied.
///
/// `SBT_CMC_URL` and `SBT_COINGECKO_URL` redirect the quote sources,
/// e.g. to a local stub during development.
pub fn page_config() -> PageConfig {
    let mut config = PageConfig {
        coinmarketcap_api_key: CMC_API_KEY.to_string(),
        ..PageConfig::default()
    };
    if let Some(url) = option_env!("SBT_CMC_URL") {
        config.coinmarketcap_url = url.to_string();
    }
    if let Some(url) = option_env!("SBT_COINGECKO_URL") {
        config.coingecko_url = url.to_string();
    }
    config
}

/// `fetch`-backed GET transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooFetch;

impl HttpFetch for GlooFetch {
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, SbtError> {
        let mut request = Request::get(url);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SbtError::Http(format!("Request failed: {}", e)))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| SbtError::Http(format!("Failed to read body: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_config_keeps_fixed_page_values() {
        let config = page_config();
        assert_eq!(config.recipient, sbt::RECIPIENT_ADDRESS);
        assert_eq!(config.fallback_rate, 2000.0);
        assert_eq!(config.refresh_interval.as_secs(), 300);
        assert_eq!(config.coinmarketcap_api_key, CMC_API_KEY);
    }
}
