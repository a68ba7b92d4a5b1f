//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{checkout, config, health, payment_intents, webhooks};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /config` - Publishable key for the client
///
/// The payment intent and checkout routes share one concurrency limit
/// (`api_max_concurrent_requests`).
///
/// ## Payment intents
/// - `POST /create-payment-intent` - Create an intent, return its client secret
/// - `GET /payment-intent/{id}` - Poll intent status
/// - `GET /payment-return` - Landing point after an off-site authorisation
///
/// ## Hosted checkout
/// - `POST /create-checkout-session` - 303 redirect to Stripe Checkout
/// - `GET /checkout-session` - Fetch a session by `sessionId`
///
/// ## Webhooks (signature verification)
/// - `POST /webhook` - Stripe events
///
/// Anything else falls through to `STATIC_DIR` when configured.
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;
    let static_dir = state.config.static_dir.clone();
    let api_max_concurrent_requests = state.config.api_max_concurrent_requests;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        .route(
            "/create-payment-intent",
            post(payment_intents::create_payment_intent),
        )
        .route(
            "/payment-intent/:id",
            get(payment_intents::get_payment_intent),
        )
        .route("/payment-return", get(payment_intents::payment_return))
        .route(
            "/create-checkout-session",
            post(checkout::create_checkout_session),
        )
        .route("/checkout-session", get(checkout::get_checkout_session))
        .layer(GlobalConcurrencyLimitLayer::new(api_max_concurrent_requests));

    let router = Router::new()
        .route("/health", get(health::health))
        .route("/config", get(config::get_config))
        .merge(api_routes)
        // Webhooks (no rate limit - controlled by Stripe)
        .route("/webhook", post(webhooks::stripe_webhook));

    let router = match static_dir {
        Some(dir) => {
            tracing::info!(static_dir = %dir, "Serving static client files");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
