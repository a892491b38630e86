//! Name/value pair wire format
//!
//! Requests and responses are flat `KEY=value&KEY=value` bodies with
//! form-urlencoded values. Keys are fixed by the provider and uppercase.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Wire field names
pub mod fields {
    pub const USER: &str = "USER";
    pub const PWD: &str = "PWD";
    pub const VERSION: &str = "VERSION";
    pub const SIGNATURE: &str = "SIGNATURE";
    pub const CURRENCYCODE: &str = "CURRENCYCODE";

    pub const METHOD: &str = "METHOD";
    pub const PAYMENTACTION: &str = "PAYMENTACTION";
    pub const AMT: &str = "AMT";
    pub const RETURNURL: &str = "RETURNURL";
    pub const CANCELURL: &str = "CANCELURL";
    pub const TOKEN: &str = "TOKEN";
    pub const PAYERID: &str = "PAYERID";

    pub const ACK: &str = "ACK";
    pub const CORRELATIONID: &str = "CORRELATIONID";
    pub const TRANSACTIONID: &str = "TRANSACTIONID";
    pub const AUTHORIZATIONID: &str = "AUTHORIZATIONID";
    pub const REFUNDTRANSACTIONID: &str = "REFUNDTRANSACTIONID";
    pub const PAYMENTSTATUS: &str = "PAYMENTSTATUS";
    pub const AVSCODE: &str = "AVSCODE";
    pub const CVV2CODE: &str = "CVV2CODE";

    pub const L_ERRORCODE: &str = "L_ERRORCODE";
    pub const L_SHORTMESSAGE: &str = "L_SHORTMESSAGE";
    pub const L_LONGMESSAGE: &str = "L_LONGMESSAGE";
    pub const L_SEVERITYCODE: &str = "L_SEVERITYCODE";

    pub const L_ERRORCODE0: &str = "L_ERRORCODE0";
    pub const L_SHORTMESSAGE0: &str = "L_SHORTMESSAGE0";
    pub const L_LONGMESSAGE0: &str = "L_LONGMESSAGE0";

    /// Fields whose values must never show up in logs or debug output
    pub const SECRET: [&str; 2] = [PWD, SIGNATURE];

    /// Name of the `index`-th entry of a repeated `L_` field
    pub fn indexed(prefix: &str, index: usize) -> String {
        format!("{}{}", prefix, index)
    }
}

/// Ordered set of request fields
#[derive(Clone, Default, PartialEq, Eq)]
pub struct NvpRequest {
    fields: Vec<(String, String)>,
}

impl NvpRequest {
    /// Create an empty request
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
        self
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Merge `other` into this request, later values win
    pub fn merge(mut self, other: NvpRequest) -> Self {
        for (key, value) in other.fields {
            self.set(key, value);
        }
        self
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Field names in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode as a form-urlencoded body
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.fields.iter())
            .finish()
    }
}

impl fmt::Debug for NvpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.fields.iter().map(|(k, v)| {
                if fields::SECRET.contains(&k.as_str()) {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            }))
            .finish()
    }
}

/// Decoded response fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NvpResponse {
    fields: HashMap<String, String>,
}

impl NvpResponse {
    /// Decode a raw response body.
    ///
    /// Never fails: malformed input yields an empty or partial mapping.
    /// When a key repeats, the last value wins.
    pub fn parse(body: &str) -> Self {
        let fields = url::form_urlencoded::parse(body.trim().as_bytes())
            .filter(|(k, _)| !k.is_empty())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { fields }
    }

    /// Get a field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Check if a field is present
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// First present field out of `keys`, in order
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    /// All fields
    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites_in_place() {
        let mut request = NvpRequest::new();
        request.set("A", "1").set("B", "2").set("A", "3");

        assert_eq!(request.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_eq!(request.get("A"), Some("3"));
        assert_eq!(request.len(), 2);
    }

    #[test]
    fn test_merge_later_wins() {
        let base = NvpRequest::new().with("USER", "u").with("CURRENCYCODE", "EUR");
        let merged = base.merge(NvpRequest::new().with("CURRENCYCODE", "USD").with("AMT", "1.00"));

        assert_eq!(
            merged.keys().collect::<Vec<_>>(),
            vec!["USER", "CURRENCYCODE", "AMT"]
        );
        assert_eq!(merged.get("CURRENCYCODE"), Some("USD"));
    }

    #[test]
    fn test_encode_escapes_values() {
        let request = NvpRequest::new()
            .with("METHOD", "SetExpressCheckout")
            .with("RETURNURL", "https://shop.example.com/ok?order=1&x=y");

        assert_eq!(
            request.encode(),
            "METHOD=SetExpressCheckout&RETURNURL=https%3A%2F%2Fshop.example.com%2Fok%3Forder%3D1%26x%3Dy"
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let request = NvpRequest::new()
            .with("USER", "merchant")
            .with("PWD", "hunter2")
            .with("SIGNATURE", "sig-abc");

        let debug = format!("{:?}", request);
        assert!(debug.contains("merchant"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("sig-abc"));
    }

    #[test]
    fn test_parse_decodes_values() {
        let response = NvpResponse::parse(
            "ACK=Success&TIMESTAMP=2011%2d01%2d01T00%3a00%3a00Z&L_LONGMESSAGE0=Some+thing%20bad",
        );

        assert_eq!(response.get("ACK"), Some("Success"));
        assert_eq!(response.get("TIMESTAMP"), Some("2011-01-01T00:00:00Z"));
        assert_eq!(response.get("L_LONGMESSAGE0"), Some("Some thing bad"));
    }

    #[test]
    fn test_parse_is_permissive() {
        assert!(NvpResponse::parse("").is_empty());
        assert!(NvpResponse::parse("<html>502 Bad Gateway</html>").get("ACK").is_none());

        let partial = NvpResponse::parse("ACK=Failure&&=orphan&BROKEN&TOKEN=EC-1");
        assert_eq!(partial.get("ACK"), Some("Failure"));
        assert_eq!(partial.get("BROKEN"), Some(""));
        assert_eq!(partial.get("TOKEN"), Some("EC-1"));
        assert_eq!(partial.len(), 3);
    }

    #[test]
    fn test_parse_last_duplicate_wins() {
        let response = NvpResponse::parse("ACK=Failure&ACK=Success");
        assert_eq!(response.get("ACK"), Some("Success"));
    }

    #[test]
    fn test_first_entry_names_match_indexed() {
        assert_eq!(fields::indexed(fields::L_ERRORCODE, 0), fields::L_ERRORCODE0);
        assert_eq!(fields::indexed(fields::L_SHORTMESSAGE, 0), fields::L_SHORTMESSAGE0);
        assert_eq!(fields::indexed(fields::L_LONGMESSAGE, 0), fields::L_LONGMESSAGE0);
    }

    #[test]
    fn test_first_of() {
        let response = NvpResponse::parse("B=2&C=3");
        assert_eq!(response.first_of(&["A", "B", "C"]), Some("2"));
        assert_eq!(response.first_of(&["A"]), None);
    }
}
