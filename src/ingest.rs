//! Address extraction from router log messages.
//!
//! The router posts free text such as
//! `login failure for user admin from 203.0.113.7 via ssh`. Only tokens that
//! parse as IPv4/IPv6 literals are offenses; everything else is dropped.

use serde::Deserialize;
use std::net::IpAddr;

/// Body of `POST /ipaddress`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestRequest {
    #[serde(default, alias = "Message")]
    pub message: String,
}

/// Whitespace-delimited tokens of `message` that are valid IP literals,
/// in order and with duplicates kept. Tokens are passed through verbatim.
pub fn extract_addresses(message: &str) -> impl Iterator<Item = &str> {
    message
        .split_whitespace()
        .filter(|token| token.parse::<IpAddr>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_order_and_duplicates() {
        let found: Vec<_> =
            extract_addresses("10.0.0.5 login failed 10.0.0.6\n10.0.0.5\t::1").collect();
        assert_eq!(found, vec!["10.0.0.5", "10.0.0.6", "10.0.0.5", "::1"]);
    }

    #[test]
    fn test_drops_malformed_tokens() {
        let found: Vec<_> =
            extract_addresses("not-an-ip 10.0.0.5 256.1.1.1 10.0.0 10.0.0.5: 10.0.0.0/8")
                .collect();
        assert_eq!(found, vec!["10.0.0.5"]);
    }

    #[test]
    fn test_empty_message() {
        assert_eq!(extract_addresses("").count(), 0);
        assert_eq!(extract_addresses("   \n ").count(), 0);
    }

    #[test]
    fn test_request_accepts_both_field_spellings() {
        let lower: IngestRequest = serde_json::from_str(r#"{"message":"a"}"#).unwrap();
        let upper: IngestRequest = serde_json::from_str(r#"{"Message":"b"}"#).unwrap();
        let missing: IngestRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(lower.message, "a");
        assert_eq!(upper.message, "b");
        assert_eq!(missing.message, "");
    }
}
