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

use super::{get_json, numeric, positive_price, PriceProvider, ResponseFailure};
use crate::transport::Transport;
use async_trait::async_trait;
use btc_core::{PercentageWindow, Provider, Result, SupportedCurrency};
use serde_json::Value;
use tracing::{debug, info, instrument};

const SIMPLE_PRICE_PATH: &str = "/api/v3/simple/price";
const MARKETS_PATH: &str = "/api/v3/coins/markets";
const SUPPORTED_CURRENCIES_PATH: &str = "/api/v3/simple/supported_vs_currencies";

/// CoinGecko id of the tracked asset
const COIN_ID: &str = "bitcoin";

pub struct CoinGeckoProvider {
  base_url: String,
}

impl CoinGeckoProvider {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into() }
  }
}

/// `{"bitcoin": {"usd": 56655}}` -> 56655
fn extract_price(body: &Value, currency: &str) -> std::result::Result<f64, ResponseFailure> {
  body
    .get(COIN_ID)
    .and_then(|prices| prices.get(currency))
    .and_then(positive_price)
    .ok_or_else(|| ResponseFailure::MissingField(format!("{}.{}", COIN_ID, currency)))
}

/// `[{"price_change_percentage_1h_in_currency": 13.37}]` -> 13.37
fn extract_percent_change(
  markets: &[Value],
  window: PercentageWindow,
) -> std::result::Result<f64, ResponseFailure> {
  let field = format!("price_change_percentage_{}_in_currency", window);
  markets
    .first()
    .and_then(|coin| coin.get(&field))
    .and_then(numeric)
    .ok_or_else(|| ResponseFailure::MissingField(format!("[0].{}", field)))
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
  #[instrument(skip(self, transport))]
  async fn fetch_value(&self, transport: &Transport, currency_code: &str) -> Result<f64> {
    // CoinGecko keys prices by lowercase currency code
    let currency = currency_code.to_lowercase();
    let params = [("ids", COIN_ID), ("vs_currencies", currency.as_str())];

    let price = get_json::<Value>(transport, &self.base_url, SIMPLE_PRICE_PATH, &params)
      .await
      .and_then(|body| extract_price(&body, &currency))
      .map_err(|failure| failure.into_value_error(self.provider()))?;

    info!("CoinGecko BTC price: {} {}", price, currency_code);
    Ok(price)
  }

  #[instrument(skip(self, transport))]
  async fn fetch_percentage_change(
    &self,
    transport: &Transport,
    window: PercentageWindow,
  ) -> Result<f64> {
    let params =
      [("ids", COIN_ID), ("vs_currency", "usd"), ("price_change_percentage", window.as_str())];

    let change = get_json::<Vec<Value>>(transport, &self.base_url, MARKETS_PATH, &params)
      .await
      .and_then(|markets| extract_percent_change(&markets, window))
      .map_err(|failure| failure.into_percentage_error(self.provider()))?;

    debug!("CoinGecko BTC change over {}: {}%", window, change);
    Ok(change)
  }

  #[instrument(skip(self, transport))]
  async fn fetch_supported_currencies(
    &self,
    transport: &Transport,
  ) -> Result<Vec<SupportedCurrency>> {
    let codes =
      get_json::<Vec<String>>(transport, &self.base_url, SUPPORTED_CURRENCIES_PATH, &[])
        .await
        .map_err(|failure| failure.into_currencies_error(self.provider()))?;

    info!("CoinGecko supports {} currencies", codes.len());
    Ok(codes.into_iter().map(SupportedCurrency::Code).collect())
  }

  fn provider(&self) -> Provider {
    Provider::CoinGecko
  }
}
