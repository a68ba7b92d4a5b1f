//! Links from status messages to the processor's test dashboard.

/// Base URL of the test-mode payments dashboard.
pub const DASHBOARD_PAYMENTS_BASE: &str = "https://dashboard.stripe.com/test/payments";

/// Rewrite every `pi_...` token in `message` into an HTML link to the dashboard.
///
/// Tokens are maximal runs of `[A-Za-z0-9_]`; everything else is copied through.
#[must_use]
pub fn dashboard_link(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut token = String::new();

    for ch in message.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            token.push(ch);
        } else {
            flush_token(&mut out, &mut token);
            out.push(ch);
        }
    }
    flush_token(&mut out, &mut token);
    out
}

fn flush_token(out: &mut String, token: &mut String) {
    if token.starts_with("pi_") && token.len() > 3 {
        out.push_str(&format!(
            "<a href=\"{DASHBOARD_PAYMENTS_BASE}/{token}\">{token}</a>"
        ));
    } else {
        out.push_str(token);
    }
    token.clear();
}
