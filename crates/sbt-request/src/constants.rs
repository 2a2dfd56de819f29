use crate::SbtError;
use alloy::primitives::Address;
use std::time::Duration;

/// Address that receives SBT request payments.
pub const RECIPIENT_ADDRESS: &str = "0x9187a235c9BF67B19C9276D874Fd493Fa7c79654";

/// ETH/USD rate used when every quote source fails.
pub const FALLBACK_ETH_USD: f64 = 2000.0;

/// The request costs one US dollar worth of ETH.
pub const PRICE_USD: f64 = 1.0;

/// Decimal places shown for the payment amount.
pub const AMOUNT_DECIMALS: usize = 6;

/// Amount shown when no rate is known yet.
pub const ESTIMATED_AMOUNT: &str = "0.000";

/// Gas limit of a plain value transfer, used when estimation fails.
pub const DEFAULT_GAS: u64 = 21_000;

/// How often the price feed is re-queried.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// How long the copy button reads "Copied!".
pub const COPY_FLASH: Duration = Duration::from_secs(2);

/// How long a payment success notice stays visible.
pub const SUCCESS_DISMISS: Duration = Duration::from_secs(5);

/// CoinMarketCap latest quote endpoint for ETH.
pub const COINMARKETCAP_URL: &str =
    "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest?symbol=ETH";

/// Header carrying the CoinMarketCap API key.
pub const COINMARKETCAP_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// CoinGecko simple price endpoint for ETH in USD.
pub const COINGECKO_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

/// Block explorer base URL.
pub const EXPLORER_BASE: &str = "https://etherscan.io";

/// Runtime page configuration. Decouples the components from compile-time
/// constants so the browser shell and tests can point them elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub recipient: String,
    pub explorer_base: String,
    pub coinmarketcap_url: String,
    pub coinmarketcap_api_key: String,
    pub coingecko_url: String,
    pub fallback_rate: f64,
    pub refresh_interval: Duration,
    pub copy_flash: Duration,
    pub success_dismiss: Duration,
    pub default_gas: u64,
}

impl Default for PageConfig {
    /// Production page configuration, without a CoinMarketCap key.
    fn default() -> Self {
        Self {
            recipient: RECIPIENT_ADDRESS.to_string(),
            explorer_base: EXPLORER_BASE.to_string(),
            coinmarketcap_url: COINMARKETCAP_URL.to_string(),
            coinmarketcap_api_key: String::new(),
            coingecko_url: COINGECKO_URL.to_string(),
            fallback_rate: FALLBACK_ETH_USD,
            refresh_interval: REFRESH_INTERVAL,
            copy_flash: COPY_FLASH,
            success_dismiss: SUCCESS_DISMISS,
            default_gas: DEFAULT_GAS,
        }
    }
}

impl PageConfig {
    /// Parsed recipient address for transaction building.
    pub fn recipient_address(&self) -> Result<Address, SbtError> {
        self.recipient
            .to_lowercase()
            .parse()
            .map_err(|e| SbtError::Config(format!("invalid recipient address: {e}")))
    }

    /// Explorer page for a transaction hash.
    pub fn explorer_tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_base.trim_end_matches('/'), tx_hash)
    }
}
