//! Application state.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::stripe::StripeClient;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Stripe client for payments (optional).
    pub stripe: Option<Arc<StripeClient>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServiceConfig) -> Self {
        let stripe = config.stripe_secret_key.as_ref().and_then(|key| {
            match StripeClient::with_base_url(
                &config.stripe_api_base,
                key,
                config.stripe_webhook_secret.clone(),
            ) {
                Ok(client) => {
                    tracing::info!(api_base = %config.stripe_api_base, "Stripe integration enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Stripe client");
                    None
                }
            }
        });

        if stripe.is_none() {
            tracing::warn!("Stripe not configured - payment endpoints will answer 500");
        }

        Self { config, stripe }
    }

    /// Borrow the Stripe client or fail the request.
    pub fn stripe(&self) -> Result<&StripeClient, ApiError> {
        self.stripe
            .as_deref()
            .ok_or(ApiError::NotConfigured("Stripe"))
    }
}
