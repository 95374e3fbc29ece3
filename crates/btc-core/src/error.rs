use crate::types::Provider;
use thiserror::Error;

/// The main error type for btc-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Unknown provider identifier
  #[error("`provider` needs to be one of `cmc` and `coingecko`, got `{0}`")]
  InvalidProvider(String),

  /// An empty API key was supplied
  #[error("You need to provide an API key.")]
  MissingApiKey,

  /// The selected provider needs an API key and none has been set
  #[error(
    "`apiKey` needs to be set if using {0}. Call `set_api_key()` with your API key before calling other functions."
  )]
  ApiKeyRequired(Provider),

  /// Loosely typed input had the wrong type
  #[error("`{field}` should be of type `{expected}`")]
  TypeMismatch { field: &'static str, expected: &'static str },

  /// Currency code is empty or not alphanumeric
  #[error("Invalid currency code: `{0}`")]
  InvalidCurrencyCode(String),

  /// Quantity is negative or not finite
  #[error("Invalid quantity: {0}")]
  InvalidQuantity(f64),

  #[error("Failed to retrieve Bitcoin value")]
  ValueRetrievalFailed,

  #[error("Failed to retrieve percentage change")]
  PercentageRetrievalFailed,

  #[error("Failed to retrieve supported currencies")]
  SupportedCurrenciesRetrievalFailed,

  /// Error reported by the provider itself in its response envelope
  #[error("Error occurred while retrieving Bitcoin value: {0}")]
  UpstreamError(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),
}

impl Error {
  /// Shorthand for a [`Error::TypeMismatch`]
  pub fn type_mismatch(field: &'static str, expected: &'static str) -> Self {
    Error::TypeMismatch { field, expected }
  }
}

/// Result type alias for btc-* crates
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalid_provider_lists_valid_set() {
    let err = Error::InvalidProvider("kraken".to_string());
    let msg = err.to_string();
    assert!(msg.contains("`cmc`"));
    assert!(msg.contains("`coingecko`"));
    assert!(msg.contains("kraken"));
  }

  #[test]
  fn test_api_key_required_names_provider() {
    let err = Error::ApiKeyRequired(Provider::CoinMarketCap);
    assert!(err.to_string().starts_with("`apiKey` needs to be set if using CoinMarketCap."));
  }

  #[test]
  fn test_type_mismatch_display() {
    let err = Error::type_mismatch("isDecimal", "boolean");
    assert_eq!(err.to_string(), "`isDecimal` should be of type `boolean`");
  }

  #[test]
  fn test_retrieval_messages() {
    assert_eq!(Error::ValueRetrievalFailed.to_string(), "Failed to retrieve Bitcoin value");
    assert_eq!(Error::PercentageRetrievalFailed.to_string(), "Failed to retrieve percentage change");
    assert_eq!(
      Error::SupportedCurrenciesRetrievalFailed.to_string(),
      "Failed to retrieve supported currencies"
    );
  }
}
