//! Payflow server HTTP client implementation.

use reqwest::Client;
use std::time::Duration;

use payflow_core::{ClientSecret, Currency, PaymentIntentHandle, PaymentMethodType};

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, ConfigResponse, CreatePaymentIntentRequest, CreatePaymentIntentResponse,
};

/// Options for creating a client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

pub(crate) fn build_http_client(options: &ClientOptions) -> Result<Client, ClientError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(options.timeout_seconds))
        .build()?)
}

/// Client for the payflow server endpoints (`/config`, `/create-payment-intent`).
#[derive(Debug, Clone)]
pub struct PayflowClient {
    client: Client,
    base_url: String,
}

impl PayflowClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the payflow server (e.g., `"http://localhost:4242"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, &ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: &ClientOptions,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(options)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the server returns no
    /// publishable key.
    pub async fn fetch_config(&self) -> Result<ConfigResponse, ClientError> {
        let url = format!("{}/config", self.base_url);
        let response = self.client.get(&url).send().await?;
        let config: ConfigResponse = self.handle_response(response).await?;

        match config.publishable_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(config),
            _ => Err(ClientError::Configuration(
                "No publishable key returned from the server. Please check `.env` and try again"
                    .into(),
            )),
        }
    }

    /// Ask the server to create a payment intent and return its handle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the server's message when the
    /// processor rejects the currency / payment method pair.
    pub async fn create_payment_intent(
        &self,
        payment_method_type: &PaymentMethodType,
        currency: &Currency,
    ) -> Result<PaymentIntentHandle, ClientError> {
        let url = format!("{}/create-payment-intent", self.base_url);
        let request = CreatePaymentIntentRequest {
            currency: currency.to_string(),
            payment_method_type: payment_method_type.to_string(),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let body: CreatePaymentIntentResponse = self.handle_response(response).await?;

        let client_secret: ClientSecret = body.client_secret.parse()?;
        let handle = PaymentIntentHandle::from_client_secret(client_secret)?;

        tracing::debug!(payment_intent_id = %handle.id, "Payment intent created");

        Ok(handle)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => Err(ClientError::Api {
                message: api_error.error.message,
                status: status.as_u16(),
            }),
            Err(_) => Err(ClientError::Api {
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}
