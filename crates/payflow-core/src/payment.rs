//! Payment intent status, payment method types and currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Amount charged by the samples, in minor units ($19.99).
pub const DEFAULT_AMOUNT: i64 = 1999;

/// Status of a payment intent as reported by the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentStatus {
    /// Waiting for a payment method to be attached.
    RequiresPaymentMethod,
    /// Payment method attached, waiting for confirmation.
    RequiresConfirmation,
    /// Customer action (3DS, redirect) is required.
    RequiresAction,
    /// The processor is processing the payment asynchronously.
    Processing,
    /// Authorised, waiting for capture.
    RequiresCapture,
    /// Canceled; no further transitions.
    Canceled,
    /// Funds captured; no further transitions.
    Succeeded,
    /// A status this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl IntentStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequiresPaymentMethod => "requires_payment_method",
            Self::RequiresConfirmation => "requires_confirmation",
            Self::RequiresAction => "requires_action",
            Self::Processing => "processing",
            Self::RequiresCapture => "requires_capture",
            Self::Canceled => "canceled",
            Self::Succeeded => "succeeded",
            Self::Unknown => "unknown",
        }
    }

    /// Whether the processor will not move the intent any further.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Canceled)
    }

    /// Whether a client should re-read the intent after a delay.
    #[must_use]
    pub const fn should_poll(self) -> bool {
        matches!(self, Self::Processing)
    }
}

impl fmt::Display for IntentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payment method type understood by the processor.
///
/// Unknown types are carried verbatim in `Other` and forwarded unchanged:
/// the processor, not payflow, decides which types and currencies combine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentMethodType {
    /// Cards.
    Card,
    /// SEPA Direct Debit.
    SepaDebit,
    /// BECS Direct Debit (Australia).
    AuBecsDebit,
    /// `GrabPay`.
    Grabpay,
    /// Afterpay / Clearpay.
    AfterpayClearpay,
    /// Alipay.
    Alipay,
    /// Bancontact.
    Bancontact,
    /// EPS.
    Eps,
    /// FPX.
    Fpx,
    /// Giropay.
    Giropay,
    /// iDEAL.
    Ideal,
    /// Klarna.
    Klarna,
    /// OXXO.
    Oxxo,
    /// Przelewy24.
    P24,
    /// Sofort.
    Sofort,
    /// Boleto.
    Boleto,
    /// WeChat Pay.
    WechatPay,
    /// Pre-authorized debit (Canada).
    AcssDebit,
    /// ACH Direct Debit.
    UsBankAccount,
    /// Any other processor type.
    Other(String),
}

impl PaymentMethodType {
    /// Wire representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Card => "card",
            Self::SepaDebit => "sepa_debit",
            Self::AuBecsDebit => "au_becs_debit",
            Self::Grabpay => "grabpay",
            Self::AfterpayClearpay => "afterpay_clearpay",
            Self::Alipay => "alipay",
            Self::Bancontact => "bancontact",
            Self::Eps => "eps",
            Self::Fpx => "fpx",
            Self::Giropay => "giropay",
            Self::Ideal => "ideal",
            Self::Klarna => "klarna",
            Self::Oxxo => "oxxo",
            Self::P24 => "p24",
            Self::Sofort => "sofort",
            Self::Boleto => "boleto",
            Self::WechatPay => "wechat_pay",
            Self::AcssDebit => "acss_debit",
            Self::UsBankAccount => "us_bank_account",
            Self::Other(other) => other,
        }
    }

    /// Whether confirming this type redirects the customer off-site and
    /// returns through a `return_url`.
    #[must_use]
    pub fn requires_redirect(&self) -> bool {
        matches!(
            self,
            Self::Grabpay
                | Self::AfterpayClearpay
                | Self::Alipay
                | Self::Bancontact
                | Self::Eps
                | Self::Fpx
                | Self::Giropay
                | Self::Ideal
                | Self::Klarna
                | Self::P24
                | Self::Sofort
                | Self::WechatPay
        )
    }
}

impl FromStr for PaymentMethodType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "card" => Self::Card,
            "sepa_debit" => Self::SepaDebit,
            "au_becs_debit" => Self::AuBecsDebit,
            "grabpay" => Self::Grabpay,
            "afterpay_clearpay" => Self::AfterpayClearpay,
            "alipay" => Self::Alipay,
            "bancontact" => Self::Bancontact,
            "eps" => Self::Eps,
            "fpx" => Self::Fpx,
            "giropay" => Self::Giropay,
            "ideal" => Self::Ideal,
            "klarna" => Self::Klarna,
            "oxxo" => Self::Oxxo,
            "p24" => Self::P24,
            "sofort" => Self::Sofort,
            "boleto" => Self::Boleto,
            "wechat_pay" => Self::WechatPay,
            "acss_debit" => Self::AcssDebit,
            "us_bank_account" => Self::UsBankAccount,
            other => {
                let well_formed = !other.is_empty()
                    && other
                        .bytes()
                        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
                if !well_formed {
                    return Err(CoreError::InvalidPaymentMethodType(other.to_string()));
                }
                Self::Other(other.to_string())
            }
        })
    }
}

impl TryFrom<String> for PaymentMethodType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PaymentMethodType> for String {
    fn from(value: PaymentMethodType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PaymentMethodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A three-letter ISO 4217 currency code, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Return the lowercase code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 3 || !trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(CoreError::InvalidCurrency(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for Currency {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_deserializes_known_and_unknown() {
        let status: IntentStatus = serde_json::from_str("\"requires_action\"").unwrap();
        assert_eq!(status, IntentStatus::RequiresAction);

        let status: IntentStatus = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(status, IntentStatus::Unknown);
    }

    #[test]
    fn status_predicates() {
        assert!(IntentStatus::Succeeded.is_terminal());
        assert!(IntentStatus::Canceled.is_terminal());
        assert!(!IntentStatus::Processing.is_terminal());
        assert!(IntentStatus::Processing.should_poll());
        assert!(!IntentStatus::RequiresAction.should_poll());
        assert_eq!(IntentStatus::RequiresPaymentMethod.to_string(), "requires_payment_method");
    }

    #[test]
    fn payment_method_type_parses_known_types() {
        assert_eq!("card".parse::<PaymentMethodType>().unwrap(), PaymentMethodType::Card);
        assert_eq!(
            "au_becs_debit".parse::<PaymentMethodType>().unwrap(),
            PaymentMethodType::AuBecsDebit
        );
        assert_eq!(PaymentMethodType::WechatPay.as_str(), "wechat_pay");
    }

    #[test]
    fn payment_method_type_forwards_unknown_types() {
        let pm: PaymentMethodType = "paynow".parse().unwrap();
        assert_eq!(pm, PaymentMethodType::Other("paynow".into()));
        assert_eq!(pm.as_str(), "paynow");
    }

    #[test]
    fn payment_method_type_rejects_garbage() {
        assert!("".parse::<PaymentMethodType>().is_err());
        assert!("Card Payment".parse::<PaymentMethodType>().is_err());
    }

    #[test]
    fn redirect_types() {
        assert!(PaymentMethodType::Grabpay.requires_redirect());
        assert!(PaymentMethodType::AfterpayClearpay.requires_redirect());
        assert!(!PaymentMethodType::Card.requires_redirect());
        assert!(!PaymentMethodType::SepaDebit.requires_redirect());
    }

    #[test]
    fn currency_is_normalized_to_lowercase() {
        let currency: Currency = "USD".parse().unwrap();
        assert_eq!(currency.as_str(), "usd");

        let currency: Currency = serde_json::from_str("\"Eur\"").unwrap();
        assert_eq!(currency.to_string(), "eur");
    }

    #[test]
    fn currency_rejects_non_iso_codes() {
        assert!("us".parse::<Currency>().is_err());
        assert!("dollars".parse::<Currency>().is_err());
        assert!("u5d".parse::<Currency>().is_err());
    }
}
