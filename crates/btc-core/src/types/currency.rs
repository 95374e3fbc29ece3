//! Supported currency listings
//!
//! The shape depends on the provider: CoinGecko lists bare lowercase codes,
//! CoinMarketCap lists fiat descriptors. Both are exposed as returned.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry of a provider's supported-currency list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SupportedCurrency {
    /// CoinGecko, e.g. `"usd"`
    Code(String),
    /// CoinMarketCap `/fiat/map` entry
    Fiat(FiatCurrency),
}

impl SupportedCurrency {
    /// Currency code regardless of provider shape
    pub fn code(&self) -> &str {
        match self {
            SupportedCurrency::Code(code) => code,
            SupportedCurrency::Fiat(fiat) => &fiat.symbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiatCurrency {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    pub symbol: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}
