//! Upstream price providers and the percentage-change windows they support

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An upstream price-data source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// CoinMarketCap Pro API, requires an API key
    #[serde(rename = "cmc")]
    CoinMarketCap,
    /// CoinGecko public API
    #[default]
    #[serde(rename = "coingecko")]
    CoinGecko,
}

impl Provider {
    /// Every recognized provider
    pub const ALL: [Provider; 2] = [Provider::CoinMarketCap, Provider::CoinGecko];

    /// Identifier accepted by [`Provider::from_str`]
    pub fn id(&self) -> &'static str {
        match self {
            Provider::CoinMarketCap => "cmc",
            Provider::CoinGecko => "coingecko",
        }
    }

    /// Default base URL of the provider's API
    pub fn base_url(&self) -> &'static str {
        match self {
            Provider::CoinMarketCap => crate::CMC_BASE_URL,
            Provider::CoinGecko => crate::COINGECKO_BASE_URL,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Provider::CoinMarketCap)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::CoinMarketCap => write!(f, "CoinMarketCap"),
            Provider::CoinGecko => write!(f, "CoinGecko"),
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cmc" => Ok(Provider::CoinMarketCap),
            "coingecko" => Ok(Provider::CoinGecko),
            _ => Err(Error::InvalidProvider(s.to_string())),
        }
    }
}

/// Time window for a percentage price change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PercentageWindow {
    LastHour,
    LastDay,
    LastWeek,
}

impl PercentageWindow {
    /// Window token used in both providers' field names and query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            PercentageWindow::LastHour => "1h",
            PercentageWindow::LastDay => "24h",
            PercentageWindow::LastWeek => "7d",
        }
    }
}

impl std::fmt::Display for PercentageWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
