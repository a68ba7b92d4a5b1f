//! Billing and shipping details collected by the payment form.
//!
//! The processor takes these as bracketed form parameters
//! (`payment_method_data[billing_details][address][city]=...`), so each type
//! can flatten itself under a caller-chosen prefix.

use serde::{Deserialize, Serialize};

/// Form-encoded request parameters, in insertion order.
pub type FormParams = Vec<(String, String)>;

/// Postal address. Every field is optional; the processor decides which
/// fields a payment method requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Street line 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    /// Street line 2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Two-letter country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    /// Append the non-empty fields under `prefix` (e.g. `shipping[address]`).
    pub fn append_form_params(&self, prefix: &str, params: &mut FormParams) {
        let fields = [
            ("line1", &self.line1),
            ("line2", &self.line2),
            ("city", &self.city),
            ("state", &self.state),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ];
        for (key, value) in fields {
            push_non_empty(params, format!("{prefix}[{key}]"), value.as_deref());
        }
    }
}

/// Billing details attached to the payment method at confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    /// Cardholder or account holder name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Billing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl BillingDetails {
    /// Billing details with only a name, as most redirect methods need.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Append the non-empty fields under `prefix`.
    pub fn append_form_params(&self, prefix: &str, params: &mut FormParams) {
        push_non_empty(params, format!("{prefix}[name]"), self.name.as_deref());
        push_non_empty(params, format!("{prefix}[email]"), self.email.as_deref());
        push_non_empty(params, format!("{prefix}[phone]"), self.phone.as_deref());
        if let Some(address) = &self.address {
            address.append_form_params(&format!("{prefix}[address]"), params);
        }
    }
}

/// Shipping details sent with the confirmation (required by Afterpay/Clearpay).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    /// Recipient name.
    pub name: String,
    /// Shipping address.
    pub address: Address,
}

impl ShippingDetails {
    /// Append the fields under `prefix` (normally `shipping`).
    pub fn append_form_params(&self, prefix: &str, params: &mut FormParams) {
        push_non_empty(params, format!("{prefix}[name]"), Some(&self.name));
        self.address
            .append_form_params(&format!("{prefix}[address]"), params);
    }
}

fn push_non_empty(params: &mut FormParams, key: String, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jenny() -> BillingDetails {
        BillingDetails {
            name: Some("Jenny Rosen".into()),
            email: Some("jenny.rosen@example.com".into()),
            phone: None,
            address: Some(Address {
                line1: Some("123 Main St.".into()),
                line2: Some(String::new()),
                city: Some("San Francisco".into()),
                state: Some("CA".into()),
                postal_code: Some("94111".into()),
                country: Some("US".into()),
            }),
        }
    }

    #[test]
    fn billing_details_flatten_under_prefix() {
        let mut params = FormParams::new();
        jenny().append_form_params("payment_method_data[billing_details]", &mut params);

        assert!(params.contains(&(
            "payment_method_data[billing_details][name]".into(),
            "Jenny Rosen".into()
        )));
        assert!(params.contains(&(
            "payment_method_data[billing_details][address][postal_code]".into(),
            "94111".into()
        )));
    }

    #[test]
    fn empty_fields_are_skipped() {
        let mut params = FormParams::new();
        jenny().append_form_params("bd", &mut params);

        assert!(params.iter().all(|(k, _)| k != "bd[address][line2]"));
        assert!(params.iter().all(|(k, _)| k != "bd[phone]"));
    }

    #[test]
    fn shipping_flattens_name_and_address() {
        let shipping = ShippingDetails {
            name: "Jenny Rosen".into(),
            address: Address {
                line1: Some("123 Main St.".into()),
                country: Some("AU".into()),
                ..Address::default()
            },
        };
        let mut params = FormParams::new();
        shipping.append_form_params("shipping", &mut params);

        assert_eq!(
            params,
            vec![
                ("shipping[name]".to_string(), "Jenny Rosen".to_string()),
                ("shipping[address][line1]".to_string(), "123 Main St.".to_string()),
                ("shipping[address][country]".to_string(), "AU".to_string()),
            ]
        );
    }
}
