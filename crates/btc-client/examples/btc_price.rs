//! Bitcoin Price Example
//!
//! This example demonstrates how to use btc-client to:
//! - Load configuration from the environment (CMC_PRO_API_KEY, BTC_VALUE_PROVIDER, ...)
//! - Get the current value in several currencies
//! - Get the percentage change over the last hour, day and week
//! - List the currencies the selected provider supports
//!
//! Run with `RUST_LOG=btc_client=debug cargo run --example btc_price`.

use anyhow::Context;
use btc_client::{BtcValueClient, ValueOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialize logging
  tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

  let client = BtcValueClient::from_env().context("Failed to load configuration")?;
  println!("Using provider: {}\n", client.provider());

  for currency in ["USD", "EUR", "NOK"] {
    match client.get_value(ValueOptions::new().currency(currency).decimal(true)).await {
      Ok(value) => println!("1 BTC = {:>12} {}", value, currency),
      Err(e) => eprintln!("Failed to get {} value: {}", currency, e),
    }
  }

  let holding = client
    .get_value(ValueOptions::new().quantity(0.25))
    .await
    .context("Failed to value holding")?;
  println!("0.25 BTC = {} USD (truncated)\n", holding);

  println!("Change last hour: {:.2}%", client.get_percentage_change_last_hour().await?);
  println!("Change last day:  {:.2}%", client.get_percentage_change_last_day().await?);
  println!("Change last week: {:.2}%", client.get_percentage_change_last_week().await?);

  let currencies = client.get_supported_currencies().await?;
  let codes: Vec<&str> = currencies.iter().take(10).map(|c| c.code()).collect();
  println!("\n{} supported currencies, first few: {}", currencies.len(), codes.join(", "));

  Ok(())
}
