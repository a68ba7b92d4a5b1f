//! The four-step confirmation handshake: config, intent, confirm, status.

use std::time::Duration;

use payflow_core::{dashboard_link, Currency, IntentStatus, PaymentIntentId};

use crate::client::{ClientOptions, PayflowClient};
use crate::confirm::{PaymentConfirmer, DEFAULT_VENDOR_BASE};
use crate::error::ClientError;
use crate::types::ConfirmParams;

/// Default wait before re-reading a `processing` intent.
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(5);

/// Ordered, human-readable status lines produced during a handshake.
#[derive(Debug, Clone, Default)]
pub struct StatusLog {
    messages: Vec<String>,
}

impl StatusLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(status = %message, "Handshake status");
        self.messages.push(message);
    }

    /// Lines in the order they were pushed.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Render as `> line<br>` HTML with intent ids linked to the dashboard.
    ///
    /// Lines are escaped first; processor messages are not trusted markup.
    #[must_use]
    pub fn render_html(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("> {}<br>", dashboard_link(&escape_html(m))))
            .collect()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

/// Options for a [`Handshake`].
#[derive(Debug, Clone)]
pub struct HandshakeOptions {
    /// Processor API base used for confirm and retrieve.
    pub vendor_base_url: String,
    /// Wait before the single re-read of a `processing` intent.
    pub poll_delay: Duration,
    /// HTTP options for the processor client.
    pub client: ClientOptions,
}

impl Default for HandshakeOptions {
    fn default() -> Self {
        Self {
            vendor_base_url: DEFAULT_VENDOR_BASE.to_string(),
            poll_delay: DEFAULT_POLL_DELAY,
            client: ClientOptions::default(),
        }
    }
}

/// Result of a completed handshake.
#[derive(Debug, Clone)]
pub struct HandshakeOutcome {
    /// Intent that was confirmed.
    pub intent_id: PaymentIntentId,
    /// Last status read from the processor.
    pub status: IntentStatus,
    /// Off-site authorisation URL for redirect-based methods.
    pub redirect_url: Option<String>,
}

/// Drives one payment from form submission to a readable status.
#[derive(Debug, Clone)]
pub struct Handshake {
    server: PayflowClient,
    options: HandshakeOptions,
}

impl Handshake {
    /// Handshake against the public processor API with default options.
    #[must_use]
    pub fn new(server: PayflowClient) -> Self {
        Self::with_options(server, HandshakeOptions::default())
    }

    /// Handshake with custom options.
    #[must_use]
    pub fn with_options(server: PayflowClient, options: HandshakeOptions) -> Self {
        Self { server, options }
    }

    /// Run the handshake for one submitted form.
    ///
    /// Any failure is pushed to `log` before it is returned. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns the first server, processor or configuration error encountered.
    pub async fn run(
        &self,
        currency: &Currency,
        params: &ConfirmParams,
        log: &mut StatusLog,
    ) -> Result<HandshakeOutcome, ClientError> {
        let result = self.drive(currency, params, log).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Payment handshake failed");
            log.push(e.display_message());
        }
        result
    }

    async fn drive(
        &self,
        currency: &Currency,
        params: &ConfirmParams,
        log: &mut StatusLog,
    ) -> Result<HandshakeOutcome, ClientError> {
        let method = &params.payment_method_type;
        if method.requires_redirect() && params.payment_method.is_none() && params.return_url.is_none()
        {
            return Err(ClientError::Configuration(format!(
                "{method} payments redirect the customer and need a return_url"
            )));
        }

        let config = self.server.fetch_config().await?;
        let publishable_key = config.publishable_key.unwrap_or_default();
        let confirmer = PaymentConfirmer::with_base_url(
            &self.options.vendor_base_url,
            publishable_key,
            &self.options.client,
        )?;

        let handle = self
            .server
            .create_payment_intent(&params.payment_method_type, currency)
            .await?;
        log.push("Client secret returned.");

        let mut intent = confirmer.confirm(&handle, params).await?;

        if intent.status.should_poll() {
            log.push(format!(
                "Payment processing: {} check webhook events for fulfillment.",
                intent.id
            ));
            log.push(format!(
                "Refetching payment intent in {}s.",
                self.options.poll_delay.as_secs()
            ));
            tokio::time::sleep(self.options.poll_delay).await;
            intent = confirmer.retrieve(&handle).await?;
        }

        log.push(format!("Payment ({}): {}", intent.id, intent.status));

        Ok(HandshakeOutcome {
            redirect_url: intent.redirect_url().map(str::to_string),
            intent_id: intent.id,
            status: intent.status,
        })
    }
}
