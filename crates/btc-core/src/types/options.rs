//! Request options and credentials
//!
//! Both types can be built from strongly typed Rust values or from loosely
//! typed JSON, in which case the runtime type checks below apply.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for a single value request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValueOptions {
    /// Currency to price Bitcoin in
    pub currency_code: String,
    /// Keep two decimals instead of truncating to an integer
    pub is_decimal: bool,
    /// Amount of Bitcoin to value
    pub quantity: Option<f64>,
}

impl Default for ValueOptions {
    fn default() -> Self {
        Self { currency_code: crate::DEFAULT_CURRENCY.to_string(), is_decimal: false, quantity: None }
    }
}

impl ValueOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the currency code
    pub fn currency(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = currency_code.into();
        self
    }

    /// Enable or disable decimal mode
    pub fn decimal(mut self, is_decimal: bool) -> Self {
        self.is_decimal = is_decimal;
        self
    }

    /// Value the given amount of Bitcoin instead of a single coin
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Check the options and return them normalized.
    ///
    /// The currency code is trimmed and uppercased. A zero quantity is the
    /// same as no quantity.
    pub fn validate(self) -> Result<Self> {
        let currency_code = self.currency_code.trim().to_uppercase();
        if currency_code.is_empty() || !currency_code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidCurrencyCode(self.currency_code));
        }

        let quantity = match self.quantity {
            Some(q) if !q.is_finite() || q < 0.0 => return Err(Error::InvalidQuantity(q)),
            Some(q) if q == 0.0 => None,
            other => other,
        };

        Ok(Self { currency_code, is_decimal: self.is_decimal, quantity })
    }
}

impl TryFrom<&Value> for ValueOptions {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        let fields = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(fields) => fields,
            _ => return Err(Error::type_mismatch("options", "object")),
        };

        let mut options = Self::default();

        if let Some(code) = fields.get("currencyCode") {
            options.currency_code =
                code.as_str().ok_or_else(|| Error::type_mismatch("currencyCode", "string"))?.to_string();
        }

        if let Some(is_decimal) = fields.get("isDecimal") {
            options.is_decimal =
                is_decimal.as_bool().ok_or_else(|| Error::type_mismatch("isDecimal", "boolean"))?;
        }

        if let Some(quantity) = fields.get("quantity").filter(|q| is_truthy(q)) {
            options.quantity =
                Some(quantity.as_f64().ok_or_else(|| Error::type_mismatch("quantity", "number"))?);
        }

        Ok(options)
    }
}

/// A non-empty provider API key
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl TryFrom<String> for ApiKey {
    type Error = Error;

    fn try_from(key: String) -> Result<Self> {
        if key.is_empty() {
            return Err(Error::MissingApiKey);
        }
        Ok(ApiKey(key))
    }
}

impl TryFrom<&str> for ApiKey {
    type Error = Error;

    fn try_from(key: &str) -> Result<Self> {
        ApiKey::try_from(key.to_string())
    }
}

impl TryFrom<&Value> for ApiKey {
    type Error = Error;

    fn try_from(key: &Value) -> Result<Self> {
        if !is_truthy(key) {
            return Err(Error::MissingApiKey);
        }
        match key {
            Value::String(s) => ApiKey::try_from(s.as_str()),
            _ => Err(Error::type_mismatch("apiKey", "string")),
        }
    }
}

/// JSON values that count as "provided"
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
