//! Request and response types for the payflow server and the payment processor.

use payflow_core::{
    BillingDetails, FormParams, IntentStatus, PaymentIntentId, PaymentMethodType, ShippingDetails,
};
use serde::{Deserialize, Serialize};

/// Response of `GET /config`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Publishable key (`pk_test_...`).
    #[serde(default)]
    pub publishable_key: Option<String>,
}

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    /// Currency code.
    pub currency: String,
    /// Payment method type.
    pub payment_method_type: String,
}

/// Response of `POST /create-payment-intent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    /// Client secret of the new intent.
    pub client_secret: String,
}

/// Error body returned by the payflow server.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    pub message: String,
}

/// Error body returned by the payment processor.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorErrorResponse {
    /// Error details.
    pub error: VendorErrorBody,
}

/// Processor error details.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Error code.
    #[serde(default)]
    pub code: Option<String>,
}

/// What the customer entered in the payment form, plus method-specific data.
#[derive(Debug, Clone)]
pub struct ConfirmParams {
    /// Payment method type being confirmed.
    pub payment_method_type: PaymentMethodType,
    /// Billing details attached to the new payment method.
    pub billing_details: BillingDetails,
    /// Shipping details (Afterpay/Clearpay needs them).
    pub shipping: Option<ShippingDetails>,
    /// Where redirect-based methods send the customer back to.
    pub return_url: Option<String>,
    /// Existing payment method to confirm with instead of creating one.
    pub payment_method: Option<String>,
    /// Extra raw parameters (`payment_method_data[sepa_debit][iban]`, mandates, ...).
    pub extra_params: FormParams,
}

impl ConfirmParams {
    /// Confirmation for `payment_method_type` with the given billing details.
    #[must_use]
    pub fn new(payment_method_type: PaymentMethodType, billing_details: BillingDetails) -> Self {
        Self {
            payment_method_type,
            billing_details,
            shipping: None,
            return_url: None,
            payment_method: None,
            extra_params: FormParams::new(),
        }
    }

    /// SEPA Direct Debit confirmation from an IBAN, with online mandate acceptance.
    #[must_use]
    pub fn sepa_debit(iban: impl Into<String>, billing_details: BillingDetails) -> Self {
        Self::new(PaymentMethodType::SepaDebit, billing_details)
            .with_param("payment_method_data[sepa_debit][iban]", iban)
            .with_param("mandate_data[customer_acceptance][type]", "online")
            .with_param(
                "mandate_data[customer_acceptance][online][infer_from_client]",
                "true",
            )
    }

    /// Set the return URL for redirect-based methods.
    #[must_use]
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    /// Set shipping details.
    #[must_use]
    pub fn with_shipping(mut self, shipping: ShippingDetails) -> Self {
        self.shipping = Some(shipping);
        self
    }

    /// Confirm with an existing payment method (e.g. `pm_card_visa` in test mode).
    #[must_use]
    pub fn with_payment_method(mut self, payment_method: impl Into<String>) -> Self {
        self.payment_method = Some(payment_method.into());
        self
    }

    /// Append one raw form parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((key.into(), value.into()));
        self
    }

    /// Flatten into processor form parameters, client secret first.
    #[must_use]
    pub fn to_form_params(&self, client_secret: &str) -> FormParams {
        let mut params = vec![("client_secret".to_string(), client_secret.to_string())];

        if let Some(pm) = &self.payment_method {
            params.push(("payment_method".into(), pm.clone()));
        } else {
            params.push((
                "payment_method_data[type]".into(),
                self.payment_method_type.to_string(),
            ));
            self.billing_details
                .append_form_params("payment_method_data[billing_details]", &mut params);
        }

        if let Some(shipping) = &self.shipping {
            shipping.append_form_params("shipping", &mut params);
        }
        if let Some(url) = &self.return_url {
            params.push(("return_url".into(), url.clone()));
        }
        params.extend(self.extra_params.iter().cloned());
        params
    }
}

/// The processor's view of an intent, as visible with a publishable key.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmedIntent {
    /// Payment intent ID.
    pub id: PaymentIntentId,
    /// Current status.
    pub status: IntentStatus,
    /// Pending customer action, if any.
    #[serde(default)]
    pub next_action: Option<NextAction>,
    /// Error from the last failed confirmation.
    #[serde(default)]
    pub last_payment_error: Option<VendorErrorBody>,
}

impl ConfirmedIntent {
    /// URL the customer must visit to authorise the payment, if any.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.next_action
            .as_ref()
            .and_then(|a| a.redirect_to_url.as_ref())
            .map(|r| r.url.as_str())
    }
}

/// Next action required to complete the payment.
#[derive(Debug, Clone, Deserialize)]
pub struct NextAction {
    /// Action type (`redirect_to_url`, `use_stripe_sdk`, ...).
    #[serde(rename = "type", default)]
    pub action_type: String,
    /// Redirect target for `redirect_to_url` actions.
    #[serde(default)]
    pub redirect_to_url: Option<RedirectToUrl>,
}

/// Redirect target.
#[derive(Debug, Clone, Deserialize)]
pub struct RedirectToUrl {
    /// Off-site authorisation URL.
    pub url: String,
    /// Where the customer lands afterwards.
    #[serde(default)]
    pub return_url: Option<String>,
}
