//! Payment intent handlers.
//!
//! These cover step 2 of the confirmation handshake (minting an intent and
//! handing its client secret to the browser) and the server-side status reads
//! used after an asynchronous or redirect-based confirmation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use payflow_core::{Currency, IntentStatus, PaymentIntentId, PaymentMethodType};

use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::PaymentIntent;

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    /// ISO currency code, any case.
    pub currency: String,
    /// Stripe payment method type (`card`, `sepa_debit`, ...).
    pub payment_method_type: String,
}

/// Response carrying the client secret for confirmation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    /// Client secret of the new intent.
    pub client_secret: String,
}

/// Create a payment intent and return its client secret.
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreatePaymentIntentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentIntentResponse>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let currency: Currency = body.currency.parse()?;
    let payment_method_type: PaymentMethodType = body.payment_method_type.parse()?;
    let stripe = state.stripe()?;

    let intent = stripe
        .create_payment_intent(state.config.payment_amount, &currency, &payment_method_type)
        .await?;

    let client_secret = intent
        .client_secret
        .ok_or_else(|| ApiError::Internal("Stripe returned no client secret".into()))?;

    tracing::info!(
        payment_intent_id = %intent.id,
        currency = %currency,
        payment_method_type = %payment_method_type,
        amount = %intent.amount,
        "Payment intent created"
    );

    Ok(Json(CreatePaymentIntentResponse { client_secret }))
}

/// Public view of a payment intent.
#[derive(Debug, Serialize)]
pub struct PaymentIntentStatusResponse {
    /// Payment intent ID.
    pub id: String,
    /// Current status.
    pub status: IntentStatus,
    /// Amount in minor units.
    pub amount: i64,
    /// Currency.
    pub currency: String,
    /// Message of the last failed confirmation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_error: Option<String>,
}

impl From<PaymentIntent> for PaymentIntentStatusResponse {
    fn from(pi: PaymentIntent) -> Self {
        Self {
            id: pi.id,
            status: pi.status,
            amount: pi.amount,
            currency: pi.currency,
            last_payment_error: pi.last_payment_error.map(|e| e.message),
        }
    }
}

/// Read the current status of a payment intent.
pub async fn get_payment_intent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PaymentIntentStatusResponse>, ApiError> {
    let id: PaymentIntentId = id.parse()?;
    let intent = state.stripe()?.retrieve_payment_intent(&id).await?;

    tracing::debug!(
        payment_intent_id = %id,
        status = %intent.status,
        terminal = intent.status.is_terminal(),
        "Payment intent polled"
    );

    Ok(Json(intent.into()))
}

/// Query string Stripe appends to a `return_url`.
#[derive(Debug, Deserialize)]
pub struct PaymentReturnQuery {
    /// Payment intent ID.
    #[serde(default)]
    pub payment_intent: Option<String>,
}

/// Status echoed back after a redirect-based confirmation.
#[derive(Debug, Serialize)]
pub struct PaymentReturnResponse {
    /// Payment intent ID.
    pub id: String,
    /// Current status.
    pub status: IntentStatus,
    /// Human-readable summary.
    pub message: String,
}

/// Handle the customer returning from an off-site authorisation page.
pub async fn payment_return(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PaymentReturnQuery>,
) -> Result<Json<PaymentReturnResponse>, ApiError> {
    let raw_id = query
        .payment_intent
        .ok_or_else(|| ApiError::BadRequest("Missing payment_intent query parameter".into()))?;
    let id: PaymentIntentId = raw_id.parse()?;

    let intent = state.stripe()?.retrieve_payment_intent(&id).await?;

    tracing::info!(payment_intent_id = %intent.id, status = %intent.status, "Customer returned");

    Ok(Json(PaymentReturnResponse {
        message: format!("Payment {} has status: {}", intent.id, intent.status),
        id: intent.id,
        status: intent.status,
    }))
}
