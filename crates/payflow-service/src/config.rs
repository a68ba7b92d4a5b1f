//! Service configuration.

use payflow_core::{PaymentMethodType, DEFAULT_AMOUNT};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

use crate::stripe::DEFAULT_API_BASE;

/// Default limit on concurrent Stripe-calling requests.
pub const DEFAULT_API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:4242").
    pub listen_addr: String,

    /// Stripe secret API key (optional).
    pub stripe_secret_key: Option<String>,

    /// Stripe publishable key served to clients by `GET /config`.
    pub stripe_publishable_key: Option<String>,

    /// Stripe webhook signing secret (optional).
    pub stripe_webhook_secret: Option<String>,

    /// Stripe API base URL (default: `https://api.stripe.com/v1`).
    pub stripe_api_base: String,

    /// Public origin of this service, used for checkout redirect URLs.
    pub domain: String,

    /// Price id sold by the prebuilt checkout page.
    pub price: Option<String>,

    /// Payment method types offered by the prebuilt checkout page.
    pub payment_method_types: Vec<PaymentMethodType>,

    /// Amount charged per payment intent, in minor units.
    pub payment_amount: i64,

    /// Directory of static client files served as the router fallback.
    pub static_dir: Option<String>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Concurrent requests allowed across all Stripe-calling routes together.
    pub api_max_concurrent_requests: usize,
}

/// Files checked, in order, for Stripe keys.
const SECRETS_PATHS: [&str; 2] = [".secrets/stripe.json", "../.secrets/stripe.json"];

/// Stripe secrets file structure.
#[derive(Debug, Default, Deserialize)]
struct StripeSecrets {
    #[serde(default)]
    secret_key: Option<String>,
    #[serde(default)]
    publishable_key: Option<String>,
    #[serde(default)]
    webhook_secret: Option<String>,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let secret_paths: Vec<&Path> = SECRETS_PATHS.iter().map(Path::new).collect();
        Self::from_sources(&secret_paths, |key| std::env::var(key).ok())
    }

    /// Build the configuration from the first readable secrets file and an
    /// environment lookup. Each Stripe key missing from the file falls back
    /// to its environment variable.
    fn from_sources(secret_paths: &[&Path], env: impl Fn(&str) -> Option<String>) -> Self {
        let file = load_stripe_secrets(secret_paths);
        let non_empty = |key: &str| env(key).filter(|v| !v.is_empty());

        let stripe_secret_key = file
            .secret_key
            .filter(|v| !v.is_empty())
            .or_else(|| non_empty("STRIPE_SECRET_KEY"));
        let stripe_publishable_key = file
            .publishable_key
            .filter(|v| !v.is_empty())
            .or_else(|| non_empty("STRIPE_PUBLISHABLE_KEY"));
        let stripe_webhook_secret = file
            .webhook_secret
            .filter(|v| !v.is_empty())
            .or_else(|| non_empty("STRIPE_WEBHOOK_SECRET"));

        Self {
            listen_addr: env("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:4242".into()),
            stripe_secret_key,
            stripe_publishable_key,
            stripe_webhook_secret,
            stripe_api_base: env("STRIPE_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            domain: env("DOMAIN").unwrap_or_else(|| "http://localhost:4242".into()),
            price: non_empty("PRICE"),
            payment_method_types: parse_payment_method_types(
                &env("PAYMENT_METHOD_TYPES").unwrap_or_else(|| "card".into()),
            ),
            payment_amount: parse_var(&env, "PAYMENT_AMOUNT").unwrap_or(DEFAULT_AMOUNT),
            static_dir: non_empty("STATIC_DIR"),
            cors_origins: env("CORS_ORIGINS")
                .unwrap_or_else(|| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            max_body_bytes: parse_var(&env, "MAX_BODY_BYTES").unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: parse_var(&env, "REQUEST_TIMEOUT_SECONDS").unwrap_or(30),
            api_max_concurrent_requests: parse_var::<usize>(&env, "API_MAX_CONCURRENT_REQUESTS")
                .filter(|n| *n > 0)
                .unwrap_or(DEFAULT_API_MAX_CONCURRENT_REQUESTS),
        }
    }
}

/// Read and parse one variable; unset or unparsable values yield `None`.
fn parse_var<T: FromStr>(env: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = %key, value = %raw, "Ignoring unparsable value");
            None
        }
    }
}

/// Parse a comma-separated list of payment method types, dropping bad entries.
#[must_use]
pub fn parse_payment_method_types(raw: &str) -> Vec<PaymentMethodType> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match s.parse() {
            Ok(pm) => Some(pm),
            Err(e) => {
                tracing::warn!(value = %s, error = %e, "Ignoring invalid payment method type");
                None
            }
        })
        .collect()
}

/// Load Stripe secrets from the first readable file, or nothing.
fn load_stripe_secrets(secret_paths: &[&Path]) -> StripeSecrets {
    for path in secret_paths {
        match load_secrets_file::<StripeSecrets>(path) {
            Ok(secrets) => {
                tracing::info!(path = %path.display(), "Loaded Stripe secrets from file");
                return secrets;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable Stripe secrets file");
            }
        }
    }

    tracing::debug!("Stripe secrets file not found, using environment variables");
    StripeSecrets::default()
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, std::io::Error> {
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:4242".into(),
            stripe_secret_key: None,
            stripe_publishable_key: None,
            stripe_webhook_secret: None,
            stripe_api_base: DEFAULT_API_BASE.into(),
            domain: "http://localhost:4242".into(),
            price: None,
            payment_method_types: vec![PaymentMethodType::Card],
            payment_amount: DEFAULT_AMOUNT,
            static_dir: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            api_max_concurrent_requests: DEFAULT_API_MAX_CONCURRENT_REQUESTS,
        }
    }
}
