//! Common types used across btc-* crates

pub mod currency;
pub mod options;
pub mod provider;

pub use currency::{FiatCurrency, SupportedCurrency};
pub use options::{ApiKey, ValueOptions};
pub use provider::{PercentageWindow, Provider};
