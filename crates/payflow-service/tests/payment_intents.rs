//! Payment intent endpoint integration tests.

mod common;

use axum::http::StatusCode;
use common::{payment_intent_json, stripe_error_json, TestHarness};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Create Payment Intent
// ============================================================================

#[tokio::test]
async fn create_card_intent_returns_client_secret() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(header_exists("authorization"))
        .and(body_string_contains("amount=1999"))
        .and(body_string_contains("currency=usd"))
        .and(body_string_contains("payment_method_types%5B0%5D=card"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(payment_intent_json(
                "pi_3Card",
                "requires_payment_method",
                "usd",
                "card",
            )),
        )
        .expect(1)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "paymentMethodType": "card", "currency": "USD" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let client_secret = body["clientSecret"].as_str().unwrap();
    assert_eq!(client_secret.split("_secret").next(), Some("pi_3Card"));
}

#[tokio::test]
async fn create_intent_uses_configured_amount() {
    let harness = TestHarness::with_config(|c| c.payment_amount = 5000).await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(body_string_contains("amount=5000"))
        .and(body_string_contains("currency=eur"))
        .and(body_string_contains("payment_method_types%5B0%5D=sepa_debit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_intent_json(
            "pi_3Sepa",
            "requires_payment_method",
            "eur",
            "sepa_debit",
        )))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "paymentMethodType": "sepa_debit", "currency": "eur" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn mismatched_currency_forwards_stripe_message() {
    let harness = TestHarness::new().await;
    let message = "The currency provided (usd) is invalid. Payments with au_becs_debit support the following currencies: aud.";

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(body_string_contains("payment_method_types%5B0%5D=au_becs_debit"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(stripe_error_json(message, "payment_intent_invalid_currency")),
        )
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "currency": "usd", "paymentMethodType": "au_becs_debit" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["message"], message);
}

#[tokio::test]
async fn unknown_payment_method_type_is_forwarded_to_stripe() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(body_string_contains("payment_method_types%5B0%5D=paynow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_intent_json(
            "pi_3PayNow",
            "requires_payment_method",
            "sgd",
            "paynow",
        )))
        .expect(1)
        .mount(&harness.stripe)
        .await;

    harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "currency": "sgd", "paymentMethodType": "paynow" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn malformed_currency_is_rejected_without_calling_stripe() {
    let harness = TestHarness::new().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "currency": "dollars", "paymentMethodType": "card" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("currency"));
}

#[tokio::test]
async fn missing_fields_use_error_body_shape() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "currency": "usd" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn stripe_not_configured_is_internal_error() {
    let harness = TestHarness::with_config(|c| c.stripe_secret_key = None).await;

    let response = harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "currency": "usd", "paymentMethodType": "card" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["message"], "Stripe not configured");
}

#[tokio::test]
async fn unreachable_stripe_is_internal_error() {
    let harness =
        TestHarness::with_config(|c| c.stripe_api_base = "http://127.0.0.1:1/v1".into()).await;

    let response = harness
        .server
        .post("/create-payment-intent")
        .json(&json!({ "currency": "usd", "paymentMethodType": "card" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["message"], "An internal error occurred");
}

// ============================================================================
// Status reads
// ============================================================================

#[tokio::test]
async fn poll_payment_intent_status() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/v1/payment_intents/pi_3Sepa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_intent_json(
            "pi_3Sepa",
            "succeeded",
            "eur",
            "sepa_debit",
        )))
        .mount(&harness.stripe)
        .await;

    let response = harness.server.get("/payment-intent/pi_3Sepa").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], "pi_3Sepa");
    assert_eq!(body["status"], "succeeded");
    assert_eq!(body["currency"], "eur");
    assert!(body.get("client_secret").is_none());
}

#[tokio::test]
async fn poll_rejects_non_intent_ids() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/payment-intent/cs_test_123").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn poll_unknown_intent_forwards_stripe_message() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/v1/payment_intents/pi_missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(stripe_error_json(
            "No such payment_intent: 'pi_missing'",
            "resource_missing",
        )))
        .mount(&harness.stripe)
        .await;

    let response = harness.server.get("/payment-intent/pi_missing").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"]["message"],
        "No such payment_intent: 'pi_missing'"
    );
}

#[tokio::test]
async fn payment_return_echoes_status() {
    let harness = TestHarness::new().await;

    Mock::given(method("GET"))
        .and(path("/v1/payment_intents/pi_3Grab"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_intent_json(
            "pi_3Grab",
            "processing",
            "myr",
            "grabpay",
        )))
        .mount(&harness.stripe)
        .await;

    let response = harness
        .server
        .get("/payment-return?return=true&payment_intent=pi_3Grab&payment_intent_client_secret=pi_3Grab_secret_x")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "processing");
    assert_eq!(body["message"], "Payment pi_3Grab has status: processing");
}

#[tokio::test]
async fn payment_return_requires_intent_id() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/payment-return?return=true").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["error"]["message"],
        "Missing payment_intent query parameter"
    );
}
