//! Stripe API client implementation.

use payflow_core::{CheckoutSessionId, Currency, PaymentIntentId, PaymentMethodType};
use reqwest::Client;
use std::time::Duration;

use super::types::{
    CheckoutSession, CheckoutSessionParams, PaymentIntent, StripeErrorResponse, WebhookEvent,
};
use crate::crypto::{construct_event, SignatureError};

/// Default Stripe API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

/// Error type for Stripe operations.
#[derive(Debug, thiserror::Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stripe API returned an error.
    #[error("Stripe API error: {error_type} - {message}")]
    Api {
        /// Error type.
        error_type: String,
        /// Human-readable message, verbatim from Stripe.
        message: String,
        /// Error code.
        code: Option<String>,
        /// HTTP status Stripe answered with.
        status: u16,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid webhook signature.
    #[error("Invalid webhook signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    base_url: String,
    api_key: String,
    webhook_secret: Option<String>,
}

impl StripeClient {
    /// Create a new Stripe client against the public API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Stripe secret API key (`sk_test_...` or `sk_live_...`)
    /// * `webhook_secret` - Optional webhook signing secret (`whsec_...`)
    pub fn new(
        api_key: impl Into<String>,
        webhook_secret: Option<String>,
    ) -> Result<Self, StripeError> {
        Self::with_base_url(DEFAULT_API_BASE, api_key, webhook_secret)
    }

    /// Create a new Stripe client against a custom base URL (mock servers, proxies).
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        webhook_secret: Option<String>,
    ) -> Result<Self, StripeError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(StripeError::Configuration("API key is empty".into()));
        }

        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            webhook_secret,
        })
    }

    /// Create a payment intent for a single payment method type.
    ///
    /// Compatibility between `currency` and `payment_method_type` is checked
    /// by Stripe; an incompatible pair comes back as [`StripeError::Api`].
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &Currency,
        payment_method_type: &PaymentMethodType,
    ) -> Result<PaymentIntent, StripeError> {
        let params = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[0]", payment_method_type.to_string()),
        ];

        tracing::debug!(
            amount = %amount,
            currency = %currency,
            payment_method_type = %payment_method_type,
            "Creating Stripe payment intent"
        );

        let response = self
            .client
            .post(format!("{}/payment_intents", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get a single payment intent by ID.
    pub async fn retrieve_payment_intent(
        &self,
        payment_intent_id: &PaymentIntentId,
    ) -> Result<PaymentIntent, StripeError> {
        let response = self
            .client
            .get(format!(
                "{}/payment_intents/{}",
                self.base_url, payment_intent_id
            ))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Create a hosted Checkout session for one price.
    pub async fn create_checkout_session(
        &self,
        session: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, StripeError> {
        let mut params = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), session.success_url.clone()),
            ("cancel_url".to_string(), session.cancel_url.clone()),
            ("line_items[0][price]".to_string(), session.price.clone()),
            (
                "line_items[0][quantity]".to_string(),
                session.quantity.to_string(),
            ),
        ];
        for (i, pm) in session.payment_method_types.iter().enumerate() {
            params.push((format!("payment_method_types[{i}]"), pm.to_string()));
        }

        tracing::debug!(
            price = %session.price,
            payment_method_types = ?session.payment_method_types,
            "Creating Stripe checkout session"
        );

        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.base_url))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Retrieve a Checkout session by ID.
    pub async fn retrieve_checkout_session(
        &self,
        session_id: &CheckoutSessionId,
    ) -> Result<CheckoutSession, StripeError> {
        let response = self
            .client
            .get(format!("{}/checkout/sessions/{}", self.base_url, session_id))
            .basic_auth(&self.api_key, Option::<&str>::None)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Verify a webhook signature and parse the event.
    ///
    /// # Arguments
    ///
    /// * `payload` - Raw request body
    /// * `signature` - Value of the `Stripe-Signature` header
    pub fn construct_event(
        &self,
        payload: &str,
        signature: &str,
    ) -> Result<WebhookEvent, StripeError> {
        let secret = self
            .webhook_secret
            .as_ref()
            .ok_or_else(|| StripeError::Configuration("Webhook secret not configured".into()))?;

        construct_event(payload, signature, secret, chrono::Utc::now().timestamp())
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StripeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<StripeErrorResponse, _> = response.json().await;

        match error_body {
            Ok(stripe_error) => Err(StripeError::Api {
                error_type: stripe_error.error.error_type,
                message: stripe_error.error.message,
                code: stripe_error.error.code,
                status: status.as_u16(),
            }),
            Err(_) => Err(StripeError::Api {
                error_type: "unknown".to_string(),
                message: format!("HTTP {status}"),
                code: None,
                status: status.as_u16(),
            }),
        }
    }
}
