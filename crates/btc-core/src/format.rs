//! Post-processing applied to a normalized price before it is returned

use crate::types::ValueOptions;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Apply quantity scaling and the decimal/integer policy to a unit price.
///
/// Scaling happens first, then the policy is applied to the scaled value:
/// integer mode truncates toward zero, decimal mode keeps at most two decimals.
/// Whole results are returned unchanged.
pub fn format_value(value: f64, options: &ValueOptions) -> f64 {
  let mut value = value;

  if let Some(quantity) = options.quantity.filter(|q| *q != 0.0) {
    value *= quantity;
  }

  if !options.is_decimal {
    value = value.trunc();
  }

  to_two_decimals(value)
}

/// Round a fractional number to two decimals, leaving whole numbers as they are
///
/// Rounding works on the shortest decimal text of `value`, so `1.005` becomes
/// `1.01` even though its binary form sits just below the midpoint.
pub fn to_two_decimals(value: f64) -> f64 {
  if !value.is_finite() || value.fract() == 0.0 {
    return value;
  }

  value
    .to_string()
    .parse::<Decimal>()
    .ok()
    .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    .and_then(|d| d.to_f64())
    .unwrap_or_else(|| (value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_integer_mode_keeps_whole_value() {
    let options = ValueOptions::default();
    assert_eq!(format_value(56655.0, &options), 56655.0);
  }

  #[test]
  fn test_integer_mode_truncates() {
    let options = ValueOptions::default();
    assert_eq!(format_value(8983.34736401, &options), 8983.0);
    assert_eq!(format_value(0.999, &options), 0.0);
  }

  #[test]
  fn test_quantity_then_truncate() {
    let options = ValueOptions::default().quantity(2.2);
    assert_eq!(format_value(56655.0, &options), 124641.0);

    // 100 * 2.2 is not exactly 220 in binary, truncation must still land on 220
    assert_eq!(format_value(100.0, &options), 220.0);
    assert_eq!(format_value(10.5, &ValueOptions::default().quantity(1.5)), 15.0);
  }

  #[test]
  fn test_decimal_mode_with_quantity() {
    let options = ValueOptions::default().decimal(true).quantity(2.2);
    assert_eq!(format_value(56655.0, &options), 124641.0);
  }

  #[test]
  fn test_decimal_mode_rounds_to_two_places() {
    let options = ValueOptions::default().decimal(true);
    assert_eq!(format_value(8983.34736401, &options), 8983.35);
    assert_eq!(format_value(83110.91835295832, &options), 83110.92);
    assert_eq!(format_value(1.5, &options), 1.5);
  }

  #[test]
  fn test_decimal_mode_rounds_written_midpoints_up() {
    let options = ValueOptions::default().decimal(true);
    assert_eq!(format_value(1.005, &options), 1.01);
    assert_eq!(format_value(2.675, &options), 2.68);
    assert_eq!(format_value(8983.345, &options), 8983.35);
    assert_eq!(format_value(-1.005, &options), -1.01);
  }

  #[test]
  fn test_decimal_mode_is_idempotent() {
    let options = ValueOptions::default().decimal(true);
    for x in [8983.35, 0.01, 12.3, 124641.0, 99999.99] {
      let once = format_value(x, &options);
      assert_eq!(once, x);
      assert_eq!(format_value(once, &options), once);
    }
  }

  #[test]
  fn test_integer_mode_never_has_fraction() {
    let options = ValueOptions::default();
    for x in [0.1, 1.999, 56655.5, 8983.34736401, 1e9 + 0.75, 3.0] {
      assert_eq!(format_value(x, &options).fract(), 0.0);
    }
  }

  #[test]
  fn test_zero_quantity_is_ignored() {
    let options = ValueOptions { quantity: Some(0.0), ..ValueOptions::default() };
    assert_eq!(format_value(56655.0, &options), 56655.0);
  }
}
