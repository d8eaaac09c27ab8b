//! DTOs for the link shortening endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// A created (or, in public mode, re-used) short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
}

impl ShortenResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            original_url: link.original_url,
            short_code: link.short_code,
            short_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let ok = ShortenRequest {
            url: "https://example.com/path?q=1".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = ShortenRequest {
            url: "not a url".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
