//! Payflow Service - HTTP API for payment intents and hosted checkout
//!
//! This is the main entry point for the payflow service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payflow_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before anything reads the environment
    let dotenv_path = dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(dotenv = ?dotenv_path, "Starting Payflow Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        domain = %config.domain,
        stripe_configured = %config.stripe_secret_key.is_some(),
        publishable_key_configured = %config.stripe_publishable_key.is_some(),
        webhook_secret_configured = %config.stripe_webhook_secret.is_some(),
        price_configured = %config.price.is_some(),
        payment_method_types = ?config.payment_method_types,
        static_dir = ?config.static_dir,
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone());

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
