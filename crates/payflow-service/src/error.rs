//! API error types and responses.
//!
//! Every error leaves the service as `{"error": {"message": "..."}}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::stripe::StripeError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - malformed input caught before calling Stripe.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Stripe rejected the request; the message is Stripe's, verbatim.
    #[error("rejected by payment processor: {0}")]
    VendorRejected(String),

    /// A required integration is not configured.
    #[error("{0} not configured")]
    NotConfigured(&'static str),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) | Self::VendorRejected(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotConfigured(what) => {
                tracing::error!(integration = %what, "Request needs an unconfigured integration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{what} not configured"),
                )
            }
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody { message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StripeError> for ApiError {
    fn from(err: StripeError) -> Self {
        match err {
            StripeError::Api {
                message,
                code,
                status,
                ..
            } => {
                tracing::warn!(
                    status = %status,
                    code = ?code,
                    message = %message,
                    "Stripe rejected request"
                );
                Self::VendorRejected(message)
            }
            StripeError::InvalidSignature(e) => Self::BadRequest(format!("Invalid signature: {e}")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<payflow_core::CoreError> for ApiError {
    fn from(err: payflow_core::CoreError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<payflow_core::IdError> for ApiError {
    fn from(err: payflow_core::IdError) -> Self {
        Self::BadRequest(err.to_string())
    }
}
