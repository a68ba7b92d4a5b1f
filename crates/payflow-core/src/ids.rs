//! Identifier types for payflow.
//!
//! Every identifier here is minted by the payment processor and treated as an
//! opaque string. The only local check is the object prefix (`pi_`, `cs_`), so
//! a checkout session id can never be passed where an intent id is expected.
//!
//! # Macro-based ID Types
//!
//! The `prefixed_id_type!` macro reduces boilerplate for prefixed identifier
//! types, keeping serialization, parsing and display consistent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to define a prefixed vendor identifier with standard trait implementations.
///
/// This macro generates a newtype wrapper around `String` with implementations for:
/// - `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `Serialize`, `Deserialize` (as string, prefix checked)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`, `AsRef<str>`
macro_rules! prefixed_id_type {
    ($name:ident, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Object prefix every identifier of this type starts with.
            pub const PREFIX: &'static str = $prefix;

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let suffix = s.strip_prefix($prefix).ok_or_else(|| IdError::InvalidPrefix {
                    expected: $prefix,
                    value: s.to_string(),
                })?;
                if suffix.is_empty()
                    || !suffix.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
                {
                    return Err(IdError::InvalidFormat(s.to_string()));
                }
                Ok(Self(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

prefixed_id_type!(PaymentIntentId, "pi_", "A payment intent identifier (`pi_...`).");
prefixed_id_type!(CheckoutSessionId, "cs_", "A hosted checkout session identifier (`cs_...`).");

/// Marker separating the intent id from the rest of a client secret.
const SECRET_MARKER: &str = "_secret";

/// Error type for identifier parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Identifier does not carry the expected object prefix.
    #[error("expected an identifier starting with {expected:?}, got {value:?}")]
    InvalidPrefix {
        /// The required prefix.
        expected: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Identifier contains characters outside `[A-Za-z0-9_]` or is empty after the prefix.
    #[error("malformed identifier: {0:?}")]
    InvalidFormat(String),

    /// Client secret does not contain the `_secret` marker.
    #[error("client secret is malformed")]
    MalformedClientSecret,
}

/// A single-use token authorising a client to confirm one payment intent.
///
/// The token embeds the intent id as its prefix (`pi_123_secret_abc`). `Debug`
/// output is redacted so secrets do not leak into logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Return the intent id encoded before the `_secret` marker.
    ///
    /// # Errors
    ///
    /// Returns an error if the marker is missing or the prefix is not a
    /// valid payment intent id.
    pub fn intent_id(&self) -> Result<PaymentIntentId, IdError> {
        let (prefix, _) = self
            .0
            .split_once(SECRET_MARKER)
            .ok_or(IdError::MalformedClientSecret)?;
        prefix.parse()
    }

    /// Return the raw secret for transmission to the processor.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl FromStr for ClientSecret {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let secret = Self(s.to_string());
        secret.intent_id()?;
        Ok(secret)
    }
}

impl TryFrom<String> for ClientSecret {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClientSecret> for String {
    fn from(secret: ClientSecret) -> Self {
        secret.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(<redacted>)")
    }
}

/// An intent id paired with the client secret that authorises its confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentHandle {
    /// Processor-assigned intent id.
    pub id: PaymentIntentId,
    /// Client secret for the intent.
    pub client_secret: ClientSecret,
}

impl PaymentIntentHandle {
    /// Build a handle from a client secret alone, deriving the intent id.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret does not encode a valid intent id.
    pub fn from_client_secret(client_secret: ClientSecret) -> Result<Self, IdError> {
        let id = client_secret.intent_id()?;
        Ok(Self { id, client_secret })
    }
}
