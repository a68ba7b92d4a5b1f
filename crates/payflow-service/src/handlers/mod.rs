//! HTTP request handlers.

pub mod checkout;
pub mod config;
pub mod health;
pub mod payment_intents;
pub mod webhooks;
