//! Price providers
//!
//! Each provider maps its own URL scheme, auth rule and JSON shape onto the
//! same three operations. The client picks the implementation matching the
//! session's selected provider on every call.

pub mod coingecko;
pub mod coinmarketcap;

pub use coingecko::CoinGeckoProvider;
pub use coinmarketcap::CoinMarketCapProvider;

use crate::transport::Transport;
use async_trait::async_trait;
use btc_core::{Error, PercentageWindow, Provider, Result, SupportedCurrency};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Asset identifier used in both providers' responses
pub const ASSET_SYMBOL: &str = "BTC";

/// Trait for Bitcoin price providers.
///
/// Implement this trait to add a new price source.
#[async_trait]
pub trait PriceProvider: Send + Sync {
  /// Current price of one Bitcoin in `currency_code` (uppercase)
  async fn fetch_value(&self, transport: &Transport, currency_code: &str) -> Result<f64>;

  /// Percentage price change over `window`, quoted in USD
  async fn fetch_percentage_change(
    &self,
    transport: &Transport,
    window: PercentageWindow,
  ) -> Result<f64>;

  /// Currencies the provider can quote in
  async fn fetch_supported_currencies(
    &self,
    transport: &Transport,
  ) -> Result<Vec<SupportedCurrency>>;

  /// Which provider this is
  fn provider(&self) -> Provider;
}

/// Why a provider response could not be used.
///
/// Each operation collapses these into its own public error kind.
#[derive(Debug)]
pub(crate) enum ResponseFailure {
  Transport(Error),
  Status(u16),
  Parse(serde_json::Error),
  Upstream(String),
  MissingField(String),
}

impl std::fmt::Display for ResponseFailure {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ResponseFailure::Transport(e) => write!(f, "{}", e),
      ResponseFailure::Status(status) => write!(f, "HTTP {}", status),
      ResponseFailure::Parse(e) => write!(f, "invalid JSON: {}", e),
      ResponseFailure::Upstream(message) => write!(f, "provider error: {}", message),
      ResponseFailure::MissingField(path) => write!(f, "missing field `{}`", path),
    }
  }
}

impl ResponseFailure {
  /// Value path: only the provider's own error message survives
  pub(crate) fn into_value_error(self, provider: Provider) -> Error {
    match self {
      ResponseFailure::Upstream(message) => Error::UpstreamError(message),
      other => {
        warn!("{} value request failed: {}", provider, other);
        Error::ValueRetrievalFailed
      }
    }
  }

  /// Percentage path: transport errors propagate unchanged
  pub(crate) fn into_percentage_error(self, provider: Provider) -> Error {
    match self {
      ResponseFailure::Transport(e) => e,
      other => {
        warn!("{} percentage change request failed: {}", provider, other);
        Error::PercentageRetrievalFailed
      }
    }
  }

  /// Supported-currencies path: everything collapses
  pub(crate) fn into_currencies_error(self, provider: Provider) -> Error {
    warn!("{} supported currencies request failed: {}", provider, self);
    Error::SupportedCurrenciesRetrievalFailed
  }
}

/// GET and parse a JSON body, rejecting non-2xx statuses
pub(crate) async fn get_json<T: DeserializeOwned>(
  transport: &Transport,
  base_url: &str,
  path: &str,
  params: &[(&str, &str)],
) -> std::result::Result<T, ResponseFailure> {
  let response =
    transport.get(base_url, path, params).await.map_err(ResponseFailure::Transport)?;

  if !response.is_success() {
    return Err(ResponseFailure::Status(response.status));
  }

  response.json().map_err(ResponseFailure::Parse)
}

/// Read a JSON number, or a string holding one
pub(crate) fn numeric(value: &Value) -> Option<f64> {
  let number = match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  number.filter(|n| n.is_finite())
}

/// A usable price is a finite number above zero
pub(crate) fn positive_price(value: &Value) -> Option<f64> {
  numeric(value).filter(|price| *price > 0.0)
}
