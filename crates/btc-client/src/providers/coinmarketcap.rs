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

use super::{get_json, numeric, positive_price, PriceProvider, ResponseFailure, ASSET_SYMBOL};
use crate::transport::Transport;
use async_trait::async_trait;
use btc_core::{
  ApiKey, FiatCurrency, PercentageWindow, Provider, Result, SupportedCurrency, DEFAULT_CURRENCY,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

const QUOTES_PATH: &str = "/v1/cryptocurrency/quotes/latest";
const FIAT_MAP_PATH: &str = "/v1/fiat/map";
const API_KEY_PARAM: &str = "CMC_PRO_API_KEY";

pub struct CoinMarketCapProvider {
  base_url: String,
  api_key: ApiKey,
}

impl CoinMarketCapProvider {
  pub fn new(base_url: impl Into<String>, api_key: ApiKey) -> Self {
    Self { base_url: base_url.into(), api_key }
  }

  /// Fetch the latest BTC quote, optionally converted into another currency
  async fn fetch_quotes(
    &self,
    transport: &Transport,
    convert: Option<&str>,
  ) -> std::result::Result<CmcQuotesResponse, ResponseFailure> {
    let mut params = vec![("symbol", ASSET_SYMBOL)];
    if let Some(code) = convert {
      params.push(("convert", code));
    }
    params.push((API_KEY_PARAM, self.api_key.as_str()));

    let response: CmcQuotesResponse =
      get_json(transport, &self.base_url, QUOTES_PATH, &params).await?;
    response.status.check()?;
    Ok(response)
  }
}

#[derive(Debug, Deserialize)]
struct CmcResponse<T> {
  #[serde(default)]
  status: CmcStatus,
  data: Option<T>,
}

type CmcQuotesResponse = CmcResponse<HashMap<String, CmcAsset>>;

#[derive(Debug, Default, Deserialize)]
struct CmcStatus {
  #[serde(default)]
  error_code: Option<i64>,
  #[serde(default)]
  error_message: Option<String>,
}

impl CmcStatus {
  fn check(&self) -> std::result::Result<(), ResponseFailure> {
    match self.error_code {
      Some(code) if code != 0 => Err(ResponseFailure::Upstream(
        self.error_message.clone().unwrap_or_else(|| "Unknown CMC error".to_string()),
      )),
      _ => Ok(()),
    }
  }
}

#[derive(Debug, Deserialize)]
struct CmcAsset {
  #[serde(default)]
  quote: HashMap<String, HashMap<String, Value>>,
}

impl CmcQuotesResponse {
  /// Quote field for the BTC entry in the given currency
  fn quote_field(&self, currency_code: &str, field: &str) -> Option<&Value> {
    self.data.as_ref()?.get(ASSET_SYMBOL)?.quote.get(currency_code)?.get(field)
  }

  fn price(&self, currency_code: &str) -> std::result::Result<f64, ResponseFailure> {
    self
      .quote_field(currency_code, "price")
      .and_then(positive_price)
      .ok_or_else(|| ResponseFailure::MissingField(format!("data.BTC.quote.{}.price", currency_code)))
  }

  fn percent_change(&self, window: PercentageWindow) -> std::result::Result<f64, ResponseFailure> {
    let field = format!("percent_change_{}", window);
    self
      .quote_field(DEFAULT_CURRENCY, &field)
      .and_then(numeric)
      .ok_or_else(|| ResponseFailure::MissingField(format!("data.BTC.quote.USD.{}", field)))
  }
}

#[async_trait]
impl PriceProvider for CoinMarketCapProvider {
  #[instrument(skip(self, transport))]
  async fn fetch_value(&self, transport: &Transport, currency_code: &str) -> Result<f64> {
    // USD is the native quote currency and needs no conversion
    let convert = (currency_code != DEFAULT_CURRENCY).then_some(currency_code);

    let price = self
      .fetch_quotes(transport, convert)
      .await
      .and_then(|response| response.price(currency_code))
      .map_err(|failure| failure.into_value_error(self.provider()))?;

    info!("CoinMarketCap BTC price: {} {}", price, currency_code);
    Ok(price)
  }

  #[instrument(skip(self, transport))]
  async fn fetch_percentage_change(
    &self,
    transport: &Transport,
    window: PercentageWindow,
  ) -> Result<f64> {
    let change = self
      .fetch_quotes(transport, None)
      .await
      .and_then(|response| response.percent_change(window))
      .map_err(|failure| failure.into_percentage_error(self.provider()))?;

    debug!("CoinMarketCap BTC change over {}: {}%", window, change);
    Ok(change)
  }

  #[instrument(skip(self, transport))]
  async fn fetch_supported_currencies(
    &self,
    transport: &Transport,
  ) -> Result<Vec<SupportedCurrency>> {
    let params = [(API_KEY_PARAM, self.api_key.as_str())];

    let fiats = get_json::<CmcResponse<Vec<FiatCurrency>>>(
      transport,
      &self.base_url,
      FIAT_MAP_PATH,
      &params,
    )
    .await
    .and_then(|response| {
      response.status.check()?;
      response.data.ok_or_else(|| ResponseFailure::MissingField("data".to_string()))
    })
    .map_err(|failure| failure.into_currencies_error(self.provider()))?;

    info!("CoinMarketCap supports {} fiat currencies", fiats.len());
    Ok(fiats.into_iter().map(SupportedCurrency::Fiat).collect())
  }

  fn provider(&self) -> Provider {
    Provider::CoinMarketCap
  }
}
