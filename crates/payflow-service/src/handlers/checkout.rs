//! Prebuilt (hosted) Checkout handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::Json;
use serde::Deserialize;

use payflow_core::CheckoutSessionId;

use crate::error::ApiError;
use crate::state::AppState;
use crate::stripe::{CheckoutSession, CheckoutSessionParams};

/// Create a Checkout session for the configured price and redirect to it.
///
/// Answers `303 See Other` with the hosted page in `Location`.
pub async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
) -> Result<Redirect, ApiError> {
    let stripe = state.stripe()?;
    let price = state
        .config
        .price
        .clone()
        .ok_or(ApiError::NotConfigured("Checkout price"))?;

    let domain = state.config.domain.trim_end_matches('/');
    // Stripe substitutes {CHECKOUT_SESSION_ID} when redirecting.
    let params = CheckoutSessionParams {
        price,
        quantity: 1,
        payment_method_types: state.config.payment_method_types.clone(),
        success_url: format!("{domain}/success.html?session_id={{CHECKOUT_SESSION_ID}}"),
        cancel_url: format!("{domain}/canceled.html"),
    };

    let session = stripe.create_checkout_session(&params).await?;

    let url = session
        .url
        .ok_or_else(|| ApiError::Internal("Stripe returned no checkout URL".into()))?;

    tracing::info!(session_id = %session.id, "Checkout session created");

    Ok(Redirect::to(&url))
}

/// Query for `GET /checkout-session`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionQuery {
    /// Checkout session ID from the success URL.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Fetch a Checkout session, e.g. to render the success page.
pub async fn get_checkout_session(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckoutSessionQuery>,
) -> Result<Json<CheckoutSession>, ApiError> {
    let session_id: CheckoutSessionId = query
        .session_id
        .ok_or_else(|| ApiError::BadRequest("Missing sessionId query parameter".into()))?
        .parse()?;

    let session = state
        .stripe()?
        .retrieve_checkout_session(&session_id)
        .await?;

    Ok(Json(session))
}
