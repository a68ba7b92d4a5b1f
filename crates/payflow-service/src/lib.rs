//! Payflow HTTP API Service.
//!
//! This crate provides the server half of the payment confirmation handshake:
//!
//! - Publishable key discovery (`GET /config`)
//! - Payment intent creation and status reads
//! - Hosted Checkout redirects
//! - Signed Stripe webhooks
//!
//! The payment intent lifecycle itself lives in Stripe. Stripe's rejections
//! are forwarded to the caller as `400 {"error":{"message":...}}` with the
//! message untouched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers without awaits stay async for routing

pub mod config;
pub mod crypto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod stripe;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
pub use stripe::{StripeClient, StripeError};
