//! Client configuration handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Configuration a client needs before talking to Stripe directly.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Stripe publishable key (`pk_test_...`).
    pub publishable_key: String,
}

/// Return the publishable key.
pub async fn get_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let publishable_key = state
        .config
        .stripe_publishable_key
        .clone()
        .filter(|k| !k.is_empty())
        .ok_or(ApiError::NotConfigured("Stripe publishable key"))?;

    Ok(Json(ConfigResponse { publishable_key }))
}
