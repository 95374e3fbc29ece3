/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use crate::providers::{CoinGeckoProvider, CoinMarketCapProvider, PriceProvider};
use crate::transport::Transport;
use btc_core::{
  format_value, ApiKey, Config, Error, PercentageWindow, Provider, Result, SupportedCurrency,
  ValueOptions,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Provider selection and credentials owned by one client
#[derive(Debug, Clone, Default)]
struct Session {
  provider: Provider,
  api_key: Option<ApiKey>,
}

/// Main btc-value client
///
/// Fetches the current Bitcoin value and its recent percentage change from the
/// selected provider. Each client carries its own provider selection and API
/// key, so independent clients never interfere.
///
/// # Examples
///
/// ```rust,no_run
/// use btc_client::{BtcValueClient, ValueOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut client = BtcValueClient::with_defaults()?;
///
///     // CoinGecko needs no key
///     let usd = client.get_value(ValueOptions::default()).await?;
///     println!("1 BTC = {} USD", usd);
///
///     client.set_provider("cmc")?;
///     client.set_api_key("your-cmc-key")?;
///     let nok = client.get_value(ValueOptions::new().currency("NOK").decimal(true)).await?;
///     println!("1 BTC = {} NOK", nok);
///
///     Ok(())
/// }
/// ```
pub struct BtcValueClient {
  config: Config,
  session: Session,
  transport: Arc<Transport>,
}

impl BtcValueClient {
  /// Create a new client
  ///
  /// # Errors
  ///
  /// Returns an error if the configuration is invalid or the HTTP client
  /// cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    config.validate()?;

    let api_key = config.api_key.as_deref().map(ApiKey::try_from).transpose()?;
    let session = Session { provider: config.provider, api_key };
    let transport = Arc::new(Transport::new(&config)?);

    debug!("Created client with provider {}", session.provider);
    Ok(Self { config, session, transport })
  }

  /// Create a client from environment variables (and `.env`)
  pub fn from_env() -> Result<Self> {
    Self::new(Config::from_env()?)
  }

  /// Create a client on CoinGecko with default settings
  pub fn with_defaults() -> Result<Self> {
    Self::new(Config::default())
  }

  /// Currently selected provider
  pub fn provider(&self) -> Provider {
    self.session.provider
  }

  /// Select a provider by identifier (`cmc` or `coingecko`)
  ///
  /// The selection is unchanged when the identifier is not recognized.
  pub fn set_provider(&mut self, id: &str) -> Result<()> {
    let provider: Provider = id.parse()?;
    self.select_provider(provider);
    Ok(())
  }

  /// Select a provider
  pub fn select_provider(&mut self, provider: Provider) {
    info!("Selected provider {}", provider);
    self.session.provider = provider;
  }

  /// Set the API key used for providers that require one
  ///
  /// Accepts `&str`, `String` or a `&serde_json::Value`. An empty key fails
  /// with [`Error::MissingApiKey`], a non-string JSON value with
  /// [`Error::TypeMismatch`]. The stored key is unchanged on error.
  pub fn set_api_key<K>(&mut self, key: K) -> Result<()>
  where
    K: TryInto<ApiKey, Error = Error>,
  {
    self.session.api_key = Some(key.try_into()?);
    Ok(())
  }

  /// Build the implementation for the selected provider.
  ///
  /// Fails before any network call when the provider needs a key and none is set.
  fn active_provider(&self) -> Result<Box<dyn PriceProvider>> {
    let provider = self.session.provider;
    let base_url = self.config.base_url(provider).to_string();

    match provider {
      Provider::CoinMarketCap => {
        let api_key = self.session.api_key.clone().ok_or(Error::ApiKeyRequired(provider))?;
        Ok(Box::new(CoinMarketCapProvider::new(base_url, api_key)))
      }
      Provider::CoinGecko => Ok(Box::new(CoinGeckoProvider::new(base_url))),
    }
  }

  /// Get the current Bitcoin value
  ///
  /// Options are validated before any request is made. The provider price is
  /// scaled by `quantity`, then truncated to an integer unless `is_decimal`
  /// is set, in which case it keeps at most two decimals.
  #[instrument(skip(self))]
  pub async fn get_value(&self, options: ValueOptions) -> Result<f64> {
    let options = options.validate()?;
    let provider = self.active_provider()?;

    let price = provider.fetch_value(&self.transport, &options.currency_code).await?;
    Ok(format_value(price, &options))
  }

  /// Get the current Bitcoin value from loosely typed JSON options
  ///
  /// Accepts `currencyCode`, `isDecimal` and `quantity` keys; wrong types fail
  /// with [`Error::TypeMismatch`] before any request is made.
  pub async fn get_value_from_json(&self, options: &Value) -> Result<f64> {
    let options = ValueOptions::try_from(options)?;
    self.get_value(options).await
  }

  /// Get the percentage change of the Bitcoin price over `window`
  #[instrument(skip(self))]
  pub async fn get_percentage_change(&self, window: PercentageWindow) -> Result<f64> {
    let provider = self.active_provider()?;
    provider.fetch_percentage_change(&self.transport, window).await
  }

  /// Percentage change over the last hour
  pub async fn get_percentage_change_last_hour(&self) -> Result<f64> {
    self.get_percentage_change(PercentageWindow::LastHour).await
  }

  /// Percentage change over the last 24 hours
  pub async fn get_percentage_change_last_day(&self) -> Result<f64> {
    self.get_percentage_change(PercentageWindow::LastDay).await
  }

  /// Percentage change over the last 7 days
  pub async fn get_percentage_change_last_week(&self) -> Result<f64> {
    self.get_percentage_change(PercentageWindow::LastWeek).await
  }

  /// Get every currency the selected provider can quote in
  ///
  /// CoinGecko returns bare codes, CoinMarketCap returns fiat descriptors.
  #[instrument(skip(self))]
  pub async fn get_supported_currencies(&self) -> Result<Vec<SupportedCurrency>> {
    let provider = self.active_provider()?;
    provider.fetch_supported_currencies(&self.transport).await
  }

  /// Configuration the client was created with
  pub fn config(&self) -> &Config {
    &self.config
  }
}

impl std::fmt::Debug for BtcValueClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BtcValueClient")
      .field("session", &self.session)
      .field("transport", &self.transport)
      .finish()
  }
}
