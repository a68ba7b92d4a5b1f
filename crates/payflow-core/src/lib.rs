//! Core types and utilities for payflow.
//!
//! This crate provides the types shared by the payflow service and client:
//!
//! - **Identifiers**: `PaymentIntentId`, `CheckoutSessionId`, `ClientSecret`
//! - **Handles**: `PaymentIntentHandle` (intent id + client secret)
//! - **Payments**: `IntentStatus`, `PaymentMethodType`, `Currency`
//! - **Billing**: `BillingDetails`, `Address`, `ShippingDetails`
//!
//! # Ownership of the intent lifecycle
//!
//! Payment intents are minted and driven by the payment processor. Nothing in
//! this crate mutates an intent's state machine; it only names the states the
//! processor reports and carries the opaque tokens it hands out.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod billing;
pub mod dashboard;
pub mod error;
pub mod ids;
pub mod payment;

pub use billing::{Address, BillingDetails, FormParams, ShippingDetails};
pub use dashboard::{dashboard_link, DASHBOARD_PAYMENTS_BASE};
pub use error::{CoreError, Result};
pub use ids::{CheckoutSessionId, ClientSecret, IdError, PaymentIntentHandle, PaymentIntentId};
pub use payment::{Currency, IntentStatus, PaymentMethodType, DEFAULT_AMOUNT};
