//! Stripe integration for payment intents, hosted checkout and webhooks.
//!
//! Stripe handles:
//! - Payment intent creation and its state machine
//! - Currency / payment method compatibility checks
//! - Hosted Checkout pages
//! - Signed webhook delivery of payment events

pub mod client;
pub mod types;

pub use client::{StripeClient, StripeError, DEFAULT_API_BASE};
pub use types::*;
