// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! URL scope test

/// Decides whether a request URL is in scope
#[derive(Debug, Clone)]
pub struct Matcher {
    fragment: String,
}

impl Matcher {
    /// Create a matcher for one path fragment
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    /// Case-sensitive substring containment, no pattern syntax
    pub fn matches(&self, url: &str) -> bool {
        url.contains(self.fragment.as_str())
    }

    /// The configured fragment
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_match() {
        let matcher = Matcher::new("device-api.example.cn/remote-control/vehicle/status/");

        assert!(matcher.matches(
            "https://device-api.example.cn/remote-control/vehicle/status/VIN123?ts=1"
        ));
        assert!(!matcher.matches("https://device-api.example.cn/remote-control/vehicle/"));
        assert!(!matcher.matches("https://other.example.cn/"));
    }

    #[test]
    fn test_case_sensitive_and_literal() {
        let matcher = Matcher::new("/Vehicle/.*");

        assert!(!matcher.matches("https://x.example/vehicle/.*"));
        assert!(!matcher.matches("https://x.example/Vehicle/status"));
        assert!(matcher.matches("https://x.example/Vehicle/.*/status"));
    }
}
