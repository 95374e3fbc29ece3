//! # btc-client
//!
//! Fetch the current Bitcoin value and its recent percentage change from
//! CoinMarketCap or CoinGecko through one API.
//!
//! ## Features
//!
//! - **Two providers**: CoinGecko (default, no key) and CoinMarketCap (API key)
//! - **Async/Await**: Built on reqwest and tokio
//! - **Normalized output**: Provider-specific JSON mapped onto plain numbers
//! - **Configurable**: Environment-based configuration via btc-core
//!
//! ## Usage
//!
//! ```rust,no_run
//! use btc_client::{BtcValueClient, Config, ValueOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BtcValueClient::new(Config::from_env()?)?;
//!
//!     let value = client.get_value(ValueOptions::new().quantity(2.5).decimal(true)).await?;
//!     println!("2.5 BTC = {} USD", value);
//!
//!     let change = client.get_percentage_change_last_day().await?;
//!     println!("24h change: {}%", change);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, btc_core::Error>`. Upstream failures are
//! reported as `ValueRetrievalFailed`, `PercentageRetrievalFailed` or
//! `SupportedCurrenciesRetrievalFailed`; only CoinMarketCap's own error
//! message on the value path is forwarded, as `UpstreamError`.

#![warn(clippy::all)]

pub mod client;
pub mod providers;
pub mod transport;

// Re-export the main client and common types
pub use btc_core::{
  format_value, ApiKey, Config, Error, FiatCurrency, PercentageWindow, Provider, Result,
  SupportedCurrency, ValueOptions,
};
pub use client::BtcValueClient;
pub use providers::{CoinGeckoProvider, CoinMarketCapProvider, PriceProvider};
