//! Error types for payflow.

use crate::ids::IdError;

/// Result type for payflow core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building core payment values from untrusted input.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Invalid identifier or client secret.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),

    /// Currency is not a three-letter ISO code.
    #[error("invalid currency: {0:?}")]
    InvalidCurrency(String),

    /// Payment method type is empty or malformed.
    #[error("invalid payment method type: {0:?}")]
    InvalidPaymentMethodType(String),
}
