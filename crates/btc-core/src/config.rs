//! Configuration management for the btc-value client

use crate::error::{Error, Result};
use crate::types::{ApiKey, Provider};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use url::Url;

/// Main configuration struct for the btc-value client
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
  /// Provider selected when the client is created
  pub provider: Provider,

  /// CoinMarketCap Pro API key
  pub api_key: Option<String>,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Base URL for the CoinMarketCap API
  pub cmc_base_url: String,

  /// Base URL for the CoinGecko API
  pub coingecko_base_url: String,

  /// Client identification sent as the User-Agent header
  pub user_agent: String,
}

impl Default for Config {
  fn default() -> Self {
    Config {
      provider: Provider::default(),
      api_key: None,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      cmc_base_url: crate::CMC_BASE_URL.to_string(),
      coingecko_base_url: crate::COINGECKO_BASE_URL.to_string(),
      user_agent: crate::USER_AGENT.to_string(),
    }
  }
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let provider = match env::var("BTC_VALUE_PROVIDER") {
      Ok(id) => id
        .parse()
        .map_err(|_| Error::Config(format!("Invalid BTC_VALUE_PROVIDER: {}", id)))?,
      Err(_) => Provider::default(),
    };

    let api_key = env::var("CMC_PRO_API_KEY").ok().filter(|key| !key.is_empty());

    let timeout_secs = env::var("BTC_VALUE_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid BTC_VALUE_TIMEOUT_SECS".to_string()))?;

    let cmc_base_url = env::var("CMC_BASE_URL").unwrap_or_else(|_| crate::CMC_BASE_URL.to_string());

    let coingecko_base_url =
      env::var("COINGECKO_BASE_URL").unwrap_or_else(|_| crate::COINGECKO_BASE_URL.to_string());

    let user_agent =
      env::var("BTC_VALUE_USER_AGENT").unwrap_or_else(|_| crate::USER_AGENT.to_string());

    let config =
      Config { provider, api_key, timeout_secs, cmc_base_url, coingecko_base_url, user_agent };
    config.validate()?;
    Ok(config)
  }

  /// Create a config with default values and the given CoinMarketCap key
  pub fn default_with_key(api_key: String) -> Self {
    Config { provider: Provider::CoinMarketCap, api_key: Some(api_key), ..Config::default() }
  }

  /// Point both providers at another host, e.g. a mock server
  pub fn with_base_url(mut self, base_url: &str) -> Self {
    self.cmc_base_url = base_url.to_string();
    self.coingecko_base_url = base_url.to_string();
    self
  }

  /// Check base URLs, timeout and API key
  pub fn validate(&self) -> Result<()> {
    for (name, base_url) in
      [("cmc_base_url", &self.cmc_base_url), ("coingecko_base_url", &self.coingecko_base_url)]
    {
      Url::parse(base_url).map_err(|e| Error::Config(format!("Invalid {}: {}", name, e)))?;
    }

    if self.timeout_secs == 0 {
      return Err(Error::Config("timeout_secs must be greater than zero".to_string()));
    }

    if let Some(key) = &self.api_key {
      ApiKey::try_from(key.as_str())?;
    }

    Ok(())
  }

  /// Base URL configured for the given provider
  pub fn base_url(&self, provider: Provider) -> &str {
    match provider {
      Provider::CoinMarketCap => &self.cmc_base_url,
      Provider::CoinGecko => &self.coingecko_base_url,
    }
  }
}
