//! Social share links for a campaign's public page.

use std::fmt::Write as _;

use serde::Serialize;

use crate::product::ProductType;

const EMAIL_SUBJECT: &str = "Check out my custom design";

/// Percent-encode `value` for use inside a URL component.
///
/// Leaves the same characters unescaped as JavaScript's
/// `encodeURIComponent`: ASCII alphanumerics and `-_.!~*'()`.
#[must_use]
pub fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || b"-_.!~*'()".contains(&byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[must_use]
pub fn share_message(product: ProductType) -> String {
    format!("Check out my custom {} design! Order yours now:", product.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub url: String,
    pub message: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub email: String,
}

impl ShareLinks {
    #[must_use]
    pub fn new(product: ProductType, share_url: &str) -> Self {
        let message = share_message(product);
        let url = encode_component(share_url);
        let text = encode_component(&message);
        Self {
            twitter: format!("https://twitter.com/intent/tweet?text={text}&url={url}"),
            facebook: format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
            linkedin: format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
            email: format!(
                "mailto:?subject={}&body={}",
                encode_component(EMAIL_SUBJECT),
                encode_component(&format!("{message} {share_url}"))
            ),
            url: share_url.to_string(),
            message,
        }
    }
}

#[cfg(test)]
#[path = "share_test.rs"]
mod tests;
