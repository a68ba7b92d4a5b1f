//! Payment confirmation against the processor, authorised by the publishable
//! key and the intent's client secret.

use reqwest::Client;

use payflow_core::PaymentIntentHandle;

use crate::client::{build_http_client, ClientOptions};
use crate::error::ClientError;
use crate::types::{ConfirmParams, ConfirmedIntent, VendorErrorResponse};

/// Default processor API base URL.
pub const DEFAULT_VENDOR_BASE: &str = "https://api.stripe.com/v1";

/// Confirms and reads payment intents the way the processor's browser SDK does.
#[derive(Debug, Clone)]
pub struct PaymentConfirmer {
    client: Client,
    base_url: String,
    publishable_key: String,
}

impl PaymentConfirmer {
    /// Create a confirmer for the public processor API.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a publishable key or the HTTP
    /// client cannot be built.
    pub fn new(publishable_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_base_url(DEFAULT_VENDOR_BASE, publishable_key, &ClientOptions::default())
    }

    /// Create a confirmer against a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a publishable key or the HTTP
    /// client cannot be built.
    pub fn with_base_url(
        base_url: impl Into<String>,
        publishable_key: impl Into<String>,
        options: &ClientOptions,
    ) -> Result<Self, ClientError> {
        let publishable_key = publishable_key.into();
        if !publishable_key.starts_with("pk_") {
            return Err(ClientError::Configuration(
                "expected a publishable key (pk_...)".into(),
            ));
        }

        Ok(Self {
            client: build_http_client(options)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            publishable_key,
        })
    }

    /// Confirm the intent with the customer's payment details.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Vendor`] when the processor declines or rejects
    /// the confirmation.
    pub async fn confirm(
        &self,
        handle: &PaymentIntentHandle,
        params: &ConfirmParams,
    ) -> Result<ConfirmedIntent, ClientError> {
        let url = format!("{}/payment_intents/{}/confirm", self.base_url, handle.id);
        let form = params.to_form_params(handle.client_secret.expose());

        tracing::debug!(
            payment_intent_id = %handle.id,
            payment_method_type = %params.payment_method_type,
            "Confirming payment intent"
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.publishable_key, Option::<&str>::None)
            .form(&form)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Re-read the intent, authorised by its client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Vendor`] when the processor rejects the read.
    pub async fn retrieve(
        &self,
        handle: &PaymentIntentHandle,
    ) -> Result<ConfirmedIntent, ClientError> {
        let url = format!("{}/payment_intents/{}", self.base_url, handle.id);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.publishable_key, Option::<&str>::None)
            .query(&[("client_secret", handle.client_secret.expose())])
            .send()
            .await?;

        self.handle_response(response).await
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ConfirmedIntent, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        match response.json::<VendorErrorResponse>().await {
            Ok(body) => Err(ClientError::Vendor {
                message: body.error.message,
                code: body.error.code,
            }),
            Err(_) => Err(ClientError::Vendor {
                message: format!("HTTP {status}"),
                code: None,
            }),
        }
    }
}
