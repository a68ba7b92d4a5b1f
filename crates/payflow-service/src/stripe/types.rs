//! Stripe API types.

use payflow_core::{IntentStatus, PaymentMethodType};
use serde::{Deserialize, Serialize};

/// Stripe `PaymentIntent` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Payment intent ID.
    pub id: String,
    /// Amount in minor units.
    #[serde(default)]
    pub amount: i64,
    /// Currency (e.g., "usd").
    #[serde(default)]
    pub currency: String,
    /// Lifecycle status.
    pub status: IntentStatus,
    /// Client secret; only present on create and on secret-authorised reads.
    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,
    /// Payment method types allowed for this intent.
    #[serde(default)]
    pub payment_method_types: Vec<PaymentMethodType>,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
    /// Error from the last failed confirmation, if any.
    #[serde(default)]
    pub last_payment_error: Option<StripeErrorDetail>,
}

/// Stripe Checkout session object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Session ID.
    pub id: String,
    /// Checkout URL to redirect the customer to.
    #[serde(default)]
    pub url: Option<String>,
    /// Payment status (`paid`, `unpaid`, `no_payment_required`).
    #[serde(default)]
    pub payment_status: Option<String>,
    /// Session status (`open`, `complete`, `expired`).
    #[serde(default)]
    pub status: Option<String>,
    /// Total amount in minor units.
    #[serde(default)]
    pub amount_total: Option<i64>,
    /// Currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Payment intent ID created by the session.
    #[serde(default)]
    pub payment_intent: Option<String>,
    /// Customer details collected on the hosted page.
    #[serde(default)]
    pub customer_details: Option<serde_json::Value>,
}

/// Parameters for creating a hosted Checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutSessionParams {
    /// Price ID for the single line item.
    pub price: String,
    /// Quantity of the line item.
    pub quantity: u32,
    /// Payment method types offered on the hosted page.
    pub payment_method_types: Vec<PaymentMethodType>,
    /// URL the customer lands on after paying.
    pub success_url: String,
    /// URL the customer lands on after canceling.
    pub cancel_url: String,
}

/// Stripe webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Event ID.
    pub id: String,
    /// Event type (e.g., "payment_intent.succeeded").
    #[serde(rename = "type")]
    pub event_type: String,
    /// Event data.
    pub data: WebhookEventData,
    /// Created timestamp (Unix).
    #[serde(default)]
    pub created: i64,
}

/// Webhook event data container.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEventData {
    /// The event object.
    pub object: serde_json::Value,
}

/// Stripe API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeErrorResponse {
    /// Error details.
    pub error: StripeErrorDetail,
}

/// Stripe error detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripeErrorDetail {
    /// Error type.
    #[serde(rename = "type", default)]
    pub error_type: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Parameter that caused the error.
    #[serde(default)]
    pub param: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_intent_parses_vendor_payload() {
        let pi: PaymentIntent = serde_json::from_value(serde_json::json!({
            "id": "pi_123",
            "object": "payment_intent",
            "amount": 1999,
            "currency": "eur",
            "status": "processing",
            "client_secret": "pi_123_secret_abc",
            "payment_method_types": ["sepa_debit"],
            "created": 1_700_000_000
        }))
        .unwrap();

        assert_eq!(pi.status, IntentStatus::Processing);
        assert_eq!(pi.payment_method_types, vec![PaymentMethodType::SepaDebit]);
        assert_eq!(pi.client_secret.as_deref(), Some("pi_123_secret_abc"));
    }

    #[test]
    fn payment_intent_never_serializes_client_secret() {
        let pi = PaymentIntent {
            id: "pi_1".into(),
            amount: 100,
            currency: "usd".into(),
            status: IntentStatus::Succeeded,
            client_secret: Some("pi_1_secret_x".into()),
            payment_method_types: vec![PaymentMethodType::Card],
            created: 0,
            last_payment_error: None,
        };
        let json = serde_json::to_string(&pi).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn error_response_parses() {
        let err: StripeErrorResponse = serde_json::from_value(serde_json::json!({
            "error": {
                "type": "invalid_request_error",
                "code": "payment_intent_invalid_currency",
                "message": "The currency provided (usd) is invalid.",
                "param": "currency"
            }
        }))
        .unwrap();
        assert_eq!(err.error.code.as_deref(), Some("payment_intent_invalid_currency"));
        assert_eq!(err.error.param.as_deref(), Some("currency"));
    }
}
