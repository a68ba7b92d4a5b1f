//! Cryptographic utilities for webhook verification.
//!
//! Stripe signs every webhook delivery with HMAC-SHA256 over
//! `"{timestamp}.{payload}"` and sends the result in the `Stripe-Signature`
//! header as `t=<unix>,v1=<hex>[,v1=<hex>...]`. Several `v1` entries appear
//! while a signing secret is being rolled.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::stripe::{StripeError, WebhookEvent};

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted distance between the signed timestamp and now, in seconds.
pub const DEFAULT_TOLERANCE_SECONDS: i64 = 300;

/// Reasons a signature header fails verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    /// Header carries no `t=` element.
    #[error("signature header has no timestamp")]
    MissingTimestamp,

    /// Header carries no `v1=` element.
    #[error("signature header has no v1 signature")]
    MissingSignature,

    /// No `v1` signature matches the payload.
    #[error("signature mismatch")]
    Mismatch,

    /// Signed timestamp is outside the tolerance window.
    #[error("timestamp {timestamp} outside tolerance of {tolerance}s")]
    TimestampOutOfTolerance {
        /// Timestamp from the header.
        timestamp: i64,
        /// Tolerance that was applied.
        tolerance: i64,
    },
}

/// Parsed `Stripe-Signature` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    /// Signing timestamp (Unix seconds) as sent.
    pub timestamp: &'a str,
    /// All `v1` signatures.
    pub signatures: Vec<&'a str>,
}

impl<'a> SignatureHeader<'a> {
    /// Parse a `t=...,v1=...` header. Unknown schemes (`v0`) are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp or every `v1` entry is missing.
    pub fn parse(header: &'a str) -> Result<Self, SignatureError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", ts)) => timestamp = Some(ts),
                Some(("v1", sig)) => signatures.push(sig),
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or(SignatureError::MissingTimestamp)?;
        if signatures.is_empty() {
            return Err(SignatureError::MissingSignature);
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

/// Verify a `Stripe-Signature` header against the raw request body.
///
/// `now` is the current Unix time; callers pass `chrono::Utc::now().timestamp()`.
///
/// # Errors
///
/// Returns the first check that fails: header shape, signature match, then
/// timestamp tolerance.
pub fn verify_stripe_signature(
    payload: &str,
    header: &str,
    secret: &str,
    now: i64,
    tolerance: i64,
) -> Result<(), SignatureError> {
    let parsed = SignatureHeader::parse(header)?;

    let signed_payload = format!("{}.{payload}", parsed.timestamp);
    let expected = hmac_sha256_hex(secret, &signed_payload);

    if !parsed
        .signatures
        .iter()
        .any(|sig| constant_time_eq(&expected, sig))
    {
        return Err(SignatureError::Mismatch);
    }

    let timestamp: i64 = parsed
        .timestamp
        .parse()
        .map_err(|_| SignatureError::MissingTimestamp)?;
    if now.abs_diff(timestamp) > tolerance.unsigned_abs() {
        return Err(SignatureError::TimestampOutOfTolerance {
            timestamp,
            tolerance,
        });
    }

    Ok(())
}

/// Verify a webhook delivery and parse its event.
///
/// # Errors
///
/// Returns [`StripeError::InvalidSignature`] when verification fails and
/// [`StripeError::Serialization`] when the verified body is not an event.
pub fn construct_event(
    payload: &str,
    header: &str,
    secret: &str,
    now: i64,
) -> Result<WebhookEvent, StripeError> {
    verify_stripe_signature(payload, header, secret, now, DEFAULT_TOLERANCE_SECONDS)?;
    Ok(serde_json::from_str(payload)?)
}

/// Build a header value signing `payload` at `timestamp`.
///
/// Used by tests and local tooling that replays events against `/webhook`.
#[must_use]
pub fn sign_stripe_payload(payload: &str, secret: &str, timestamp: i64) -> String {
    let signature = hmac_sha256_hex(secret, &format!("{timestamp}.{payload}"));
    format!("t={timestamp},v1={signature}")
}

/// Compute HMAC-SHA256 and return hex-encoded result.
///
/// # Panics
///
/// Never in practice; HMAC key construction cannot fail for SHA-256.
#[must_use]
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    // INVARIANT: HMAC accepts keys of any size (RFC 2104).
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC-SHA256 accepts any key size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test123secret456";
    const PAYLOAD: &str = r#"{"id":"evt_1","type":"payment_intent.succeeded"}"#;
    const NOW: i64 = 1_700_000_000;

    #[test]
    fn hmac_sha256_matches_rfc_4231_case_2() {
        assert_eq!(
            hmac_sha256_hex("Jefe", "what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn constant_time_eq_cases() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(constant_time_eq("", ""));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "ab"));
        assert!(!constant_time_eq("abc", "ABC"));
    }

    #[test]
    fn header_parse_collects_all_v1_signatures() {
        let header = SignatureHeader::parse("t=12,v1=aa,v0=zz,v1=bb").unwrap();
        assert_eq!(header.timestamp, "12");
        assert_eq!(header.signatures, vec!["aa", "bb"]);
    }

    #[test]
    fn header_parse_requires_timestamp_and_signature() {
        assert_eq!(
            SignatureHeader::parse("v1=aa"),
            Err(SignatureError::MissingTimestamp)
        );
        assert_eq!(
            SignatureHeader::parse("t=12,v0=aa"),
            Err(SignatureError::MissingSignature)
        );
    }

    #[test]
    fn valid_signature_verifies() {
        let header = sign_stripe_payload(PAYLOAD, SECRET, NOW);
        assert_eq!(
            verify_stripe_signature(PAYLOAD, &header, SECRET, NOW + 10, DEFAULT_TOLERANCE_SECONDS),
            Ok(())
        );
    }

    #[test]
    fn any_matching_v1_is_accepted() {
        let good = sign_stripe_payload(PAYLOAD, SECRET, NOW);
        let sig = good.split_once("v1=").unwrap().1;
        let header = format!("t={NOW},v1=deadbeef,v1={sig}");
        assert!(verify_stripe_signature(PAYLOAD, &header, SECRET, NOW, 300).is_ok());
    }

    #[test]
    fn modified_payload_is_rejected() {
        let header = sign_stripe_payload(PAYLOAD, SECRET, NOW);
        let tampered = PAYLOAD.replace("succeeded", "canceled");
        assert_eq!(
            verify_stripe_signature(&tampered, &header, SECRET, NOW, 300),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let header = sign_stripe_payload(PAYLOAD, "whsec_other", NOW);
        assert_eq!(
            verify_stripe_signature(PAYLOAD, &header, SECRET, NOW, 300),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn extreme_timestamp_is_out_of_tolerance() {
        let header = sign_stripe_payload(PAYLOAD, SECRET, i64::MIN);
        assert_eq!(
            verify_stripe_signature(PAYLOAD, &header, SECRET, NOW, 300),
            Err(SignatureError::TimestampOutOfTolerance {
                timestamp: i64::MIN,
                tolerance: 300
            })
        );

        let header = sign_stripe_payload(PAYLOAD, SECRET, i64::MAX);
        assert!(verify_stripe_signature(PAYLOAD, &header, SECRET, -NOW, 300).is_err());
    }

    #[test]
    fn construct_event_parses_verified_body() {
        let payload = r#"{"id":"evt_1","type":"payment_intent.succeeded","data":{"object":{"id":"pi_1"}}}"#;
        let header = sign_stripe_payload(payload, SECRET, NOW);

        let event = construct_event(payload, &header, SECRET, NOW).unwrap();
        assert_eq!(event.event_type, "payment_intent.succeeded");

        assert!(matches!(
            construct_event("not json", &sign_stripe_payload("not json", SECRET, NOW), SECRET, NOW),
            Err(StripeError::Serialization(_))
        ));
        assert!(matches!(
            construct_event(payload, &header, "whsec_other", NOW),
            Err(StripeError::InvalidSignature(SignatureError::Mismatch))
        ));
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let header = sign_stripe_payload(PAYLOAD, SECRET, NOW - 600);
        assert_eq!(
            verify_stripe_signature(PAYLOAD, &header, SECRET, NOW, 300),
            Err(SignatureError::TimestampOutOfTolerance {
                timestamp: NOW - 600,
                tolerance: 300
            })
        );
    }
}
