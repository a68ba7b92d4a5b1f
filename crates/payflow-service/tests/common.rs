//! Common test utilities for payflow integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::MockServer;

use payflow_service::{create_router, AppState, ServiceConfig};

/// Publishable key served by `/config` in tests.
pub const PUBLISHABLE_KEY: &str = "pk_test_51Example";

/// Secret key the harness authenticates to the mock Stripe with.
pub const SECRET_KEY: &str = "sk_test_51Example";

/// Webhook signing secret used by signed-webhook tests.
pub const WEBHOOK_SECRET: &str = "whsec_test123secret456";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Mock standing in for `https://api.stripe.com/v1`.
    pub stripe: MockServer,
}

impl TestHarness {
    /// Harness with Stripe configured and no webhook secret.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Harness with Stripe configured plus caller tweaks to the config.
    pub async fn with_config(tweak: impl FnOnce(&mut ServiceConfig)) -> Self {
        let stripe = MockServer::start().await;

        let mut config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            stripe_secret_key: Some(SECRET_KEY.into()),
            stripe_publishable_key: Some(PUBLISHABLE_KEY.into()),
            stripe_webhook_secret: None,
            stripe_api_base: format!("{}/v1", stripe.uri()),
            domain: "http://localhost:4242".into(),
            price: Some("price_123".into()),
            ..ServiceConfig::default()
        };
        tweak(&mut config);

        let state = AppState::new(config);
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self { server, stripe }
    }
}

/// A payment intent body as Stripe returns it.
pub fn payment_intent_json(id: &str, status: &str, currency: &str, pm_type: &str) -> Value {
    json!({
        "id": id,
        "object": "payment_intent",
        "amount": 1999,
        "currency": currency,
        "status": status,
        "client_secret": format!("{id}_secret_Zx9yW8"),
        "payment_method_types": [pm_type],
        "created": 1_700_000_000
    })
}

/// A Stripe error body.
pub fn stripe_error_json(message: &str, code: &str) -> Value {
    json!({
        "error": {
            "type": "invalid_request_error",
            "code": code,
            "message": message
        }
    })
}
