//! Payflow Client SDK.
//!
//! This crate drives the payment confirmation handshake against a payflow
//! server and the payment processor.
//!
//! # Example
//!
//! ```no_run
//! use payflow_client::{BillingDetails, ConfirmParams, Handshake, PayflowClient, StatusLog};
//! use payflow_core::{Currency, PaymentMethodType};
//!
//! # async fn example() -> Result<(), payflow_client::ClientError> {
//! let server = PayflowClient::new("http://localhost:4242")?;
//! let handshake = Handshake::new(server);
//!
//! let params = ConfirmParams::new(PaymentMethodType::Card, BillingDetails::named("Jenny Rosen"))
//!     .with_payment_method("pm_card_visa");
//! let currency: Currency = "usd".parse().expect("valid currency");
//!
//! let mut log = StatusLog::new();
//! let outcome = handshake.run(&currency, &params, &mut log).await?;
//!
//! println!("{} is {}", outcome.intent_id, outcome.status);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod confirm;
mod error;
mod handshake;
mod types;

pub use client::{ClientOptions, PayflowClient};
pub use confirm::{PaymentConfirmer, DEFAULT_VENDOR_BASE};
pub use error::ClientError;
pub use handshake::{Handshake, HandshakeOptions, HandshakeOutcome, StatusLog, DEFAULT_POLL_DELAY};
pub use payflow_core::{Address, BillingDetails, ShippingDetails};
pub use types::*;
