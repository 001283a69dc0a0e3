//! Scan results
//!
//! The decoded payload plus a derived URL-validity flag that drives the
//! open-link affordance in the UI.

use url::Url;

/// A successfully decoded QR payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Decoded text, verbatim.
    pub text: String,
    /// Whether the text parses as a well-formed absolute URL.
    pub is_url: bool,
}

impl ScanResult {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let is_url = Url::parse(&text).is_ok();
        Self { text, is_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url_is_valid() {
        let result = ScanResult::new("https://example.com");
        assert!(result.is_url);
        assert_eq!(result.text, "https://example.com");
    }

    #[test]
    fn test_plain_text_is_not_url() {
        assert!(!ScanResult::new("plain text").is_url);
        assert!(!ScanResult::new("").is_url);
    }

    #[test]
    fn test_non_http_schemes_parse() {
        // Same semantics as browser URL parsing: any absolute URL counts
        assert!(ScanResult::new("mailto:someone@example.com").is_url);
        assert!(ScanResult::new("wifi:T:WPA;S:mynet;P:secret;;").is_url);
    }

    #[test]
    fn test_relative_path_is_not_url() {
        assert!(!ScanResult::new("/just/a/path").is_url);
    }
}
