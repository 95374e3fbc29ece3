//! CoinGecko provider against a mock server

use btc_client::{BtcValueClient, Config, Error, SupportedCurrency, ValueOptions};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BtcValueClient {
  let config = Config::default().with_base_url(&server.uri());
  BtcValueClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn test_value_in_usd() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/simple/price"))
    .and(query_param("ids", "bitcoin"))
    .and(query_param("vs_currencies", "usd"))
    .and(header("user-agent", btc_core::USER_AGENT))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"usd": 56655}})))
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let value = client.get_value(ValueOptions::default()).await.unwrap();
  assert_eq!(value, 56655.0);
}

#[tokio::test]
async fn test_value_in_other_currency_with_quantity() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/simple/price"))
    .and(query_param("vs_currencies", "nok"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"nok": 587123.456}})),
    )
    .mount(&server)
    .await;

  let client = client_for(&server);

  let value = client.get_value(ValueOptions::new().currency("nok")).await.unwrap();
  assert_eq!(value, 587123.0);

  let value = client.get_value(ValueOptions::new().currency("NOK").decimal(true)).await.unwrap();
  assert_eq!(value, 587123.46);

  let value = client.get_value(ValueOptions::new().currency("NOK").quantity(2.0)).await.unwrap();
  assert_eq!(value, 1174246.0);
}

#[tokio::test]
async fn test_value_from_json_options() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/simple/price"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"usd": 56655}})))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let value = client
    .get_value_from_json(&json!({"currencyCode": "USD", "isDecimal": false, "quantity": 2.2}))
    .await
    .unwrap();
  assert_eq!(value, 124641.0);
}

#[tokio::test]
async fn test_value_missing_currency_key() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/simple/price"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"eur": 50000}})))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let result = client.get_value(ValueOptions::default()).await;
  assert!(matches!(result, Err(Error::ValueRetrievalFailed)));
}

#[tokio::test]
async fn test_value_collapses_upstream_failures() {
  let responses = [
    ResponseTemplate::new(500).set_body_json(json!({"bitcoin": {"usd": 56655}})),
    ResponseTemplate::new(429).set_body_json(json!({"status": {"error_code": 429}})),
    ResponseTemplate::new(200).set_body_string("no_json here"),
  ];

  for response in responses {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v3/simple/price"))
      .respond_with(response)
      .mount(&server)
      .await;

    let client = client_for(&server);
    let result = client.get_value(ValueOptions::default()).await;
    assert!(matches!(result, Err(Error::ValueRetrievalFailed)), "got {:?}", result);
  }
}

#[tokio::test]
async fn test_percentage_change_last_hour() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/coins/markets"))
    .and(query_param("ids", "bitcoin"))
    .and(query_param("vs_currency", "usd"))
    .and(query_param("price_change_percentage", "1h"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!([{"price_change_percentage_1h_in_currency": 13.37}])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  assert_eq!(client.get_percentage_change_last_hour().await.unwrap(), 13.37);
}

#[tokio::test]
async fn test_percentage_change_day_and_week() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/coins/markets"))
    .and(query_param("price_change_percentage", "24h"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!([{"price_change_percentage_24h_in_currency": -1.0296}])),
    )
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/v3/coins/markets"))
    .and(query_param("price_change_percentage", "7d"))
    .respond_with(
      ResponseTemplate::new(200)
        .set_body_json(json!([{"price_change_percentage_7d_in_currency": 3.72573}])),
    )
    .mount(&server)
    .await;

  let client = client_for(&server);
  assert_eq!(client.get_percentage_change_last_day().await.unwrap(), -1.0296);
  assert_eq!(client.get_percentage_change_last_week().await.unwrap(), 3.72573);
}

#[tokio::test]
async fn test_percentage_change_missing_field() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/coins/markets"))
    .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
      "id": "bitcoin",
      "current_price": 56655,
      "price_change_percentage_24h_in_currency": 1.5
    }])))
    .mount(&server)
    .await;

  let client = client_for(&server);
  let result = client.get_percentage_change_last_hour().await;
  assert!(matches!(result, Err(Error::PercentageRetrievalFailed)));
}

#[tokio::test]
async fn test_percentage_change_bad_status() {
  let responses = [
    ResponseTemplate::new(404),
    ResponseTemplate::new(200).set_body_string("no_json here"),
    ResponseTemplate::new(200).set_body_json(json!([])),
    ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {}})),
  ];

  for response in responses {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v3/coins/markets"))
      .respond_with(response)
      .mount(&server)
      .await;

    let client = client_for(&server);
    let result = client.get_percentage_change_last_week().await;
    assert!(matches!(result, Err(Error::PercentageRetrievalFailed)), "got {:?}", result);
  }
}

#[tokio::test]
async fn test_supported_currencies() {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path("/api/v3/simple/supported_vs_currencies"))
    .respond_with(
      ResponseTemplate::new(200).set_body_json(json!(["btc", "eth", "ltc", "bch", "bnb"])),
    )
    .expect(1)
    .mount(&server)
    .await;

  let client = client_for(&server);
  let currencies = client.get_supported_currencies().await.unwrap();

  let expected: Vec<SupportedCurrency> = ["btc", "eth", "ltc", "bch", "bnb"]
    .iter()
    .map(|code| SupportedCurrency::Code(code.to_string()))
    .collect();
  assert_eq!(currencies, expected);
}

#[tokio::test]
async fn test_supported_currencies_invalid_responses() {
  let responses = [
    ResponseTemplate::new(200).set_body_json(json!({})),
    ResponseTemplate::new(200).set_body_json(json!({"invalid_response": "here"})),
    ResponseTemplate::new(500).set_body_json(json!(["usd"])),
    ResponseTemplate::new(200).set_body_json(json!([1, 2])),
    ResponseTemplate::new(200).set_body_string("no_json here"),
  ];

  for response in responses {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v3/simple/supported_vs_currencies"))
      .respond_with(response)
      .mount(&server)
      .await;

    let client = client_for(&server);
    let result = client.get_supported_currencies().await;
    assert!(matches!(result, Err(Error::SupportedCurrenciesRetrievalFailed)), "got {:?}", result);
  }
}
