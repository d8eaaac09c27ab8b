//! Syntactic validation of submitted URLs.
//!
//! URLs are checked but never rewritten: the stored `original_url` is exactly
//! what the client sent, so redirects and deduplication see the same string.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http` or `https` URL with a host.
///
/// Rejects potentially dangerous schemes like `javascript:`, `data:`, `file:`.
///
/// # Examples
///
/// ```
/// use snaplink::utils::url_validator::validate_url;
///
/// assert!(validate_url("https://example.com/path?q=1").is_ok());
/// assert!(validate_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("https://example.com:8443/a/b?c=d#frag").is_ok());
    }

    #[test]
    fn test_accepts_ip_hosts() {
        assert!(validate_url("http://127.0.0.1:8000/").is_ok());
        assert!(validate_url("http://[::1]/").is_ok());
    }

    #[test]
    fn test_rejects_relative_and_garbage() {
        assert!(matches!(
            validate_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_url("/relative/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(validate_url("").is_err());
    }

    #[test]
    fn test_rejects_other_schemes() {
        for input in [
            "ftp://example.com/file",
            "javascript:alert(1)",
            "data:text/plain,hello",
            "file:///etc/passwd",
            "mailto:someone@example.com",
        ] {
            assert_eq!(
                validate_url(input),
                Err(UrlValidationError::UnsupportedProtocol),
                "{input} should be rejected"
            );
        }
    }
}
