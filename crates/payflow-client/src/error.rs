//! Client error types.

/// Errors that can occur while running the payment handshake.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The payflow server returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// Message from the `{"error":{"message"}}` body.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The payment processor rejected a confirmation or read.
    #[error("payment processor error: {message}")]
    Vendor {
        /// Processor message, suitable for display to the customer.
        message: String,
        /// Processor error code, if any.
        code: Option<String>,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Server handed back an unusable identifier or client secret.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] payflow_core::IdError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Text to show the customer, mirroring what the payment form displays.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Api { message, .. } | Self::Vendor { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
