pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use format::format_value;
pub use types::{
  ApiKey, FiatCurrency, PercentageWindow, Provider, SupportedCurrency, ValueOptions,
};

/// Base URL for the CoinMarketCap Pro API
pub const CMC_BASE_URL: &str = "https://pro-api.coinmarketcap.com";

/// Base URL for the CoinGecko API
pub const COINGECKO_BASE_URL: &str = "https://api.coingecko.com";

/// Client identification sent with every request
pub const USER_AGENT: &str = "btc-value (https://github.com/knutkirkhorn/btc-value)";

/// Currency used when none is requested; also the providers' native quote currency
pub const DEFAULT_CURRENCY: &str = "USD";

/// Request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
