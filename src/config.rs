// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Hook configuration
//!
//! All values are deployment-time settings. Nothing here is derived from
//! the intercepted request.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Environment variable overriding the relay endpoint
pub const ENV_ENDPOINT: &str = "TOKENRELAY_ENDPOINT";
/// Environment variable overriding the relay API key
pub const ENV_API_KEY: &str = "TOKENRELAY_API_KEY";

/// Default header carrying the credential
pub const DEFAULT_HEADER_NAME: &str = "Authorization";
/// Default in-scope path fragment
pub const DEFAULT_PATH_FRAGMENT: &str = "/remote-control/vehicle/status/";

/// Top-level hook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// URL fragment that puts a request in scope (case-sensitive substring)
    pub path_fragment: String,
    /// Canonical name of the credential header
    pub header_name: String,
    /// Remote store settings
    pub relay: RelayConfig,
    /// When to release the interception session
    pub completion: CompletionPolicy,
    /// Local feedback settings
    pub notification: NotificationConfig,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            path_fragment: DEFAULT_PATH_FRAGMENT.to_string(),
            header_name: DEFAULT_HEADER_NAME.to_string(),
            relay: RelayConfig::default(),
            completion: CompletionPolicy::default(),
            notification: NotificationConfig::default(),
        }
    }
}

impl HookConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: HookConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Override relay settings from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.is_empty()) {
            self.relay.endpoint = endpoint;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.relay.api_key = key;
        }
        self
    }

    /// Set the in-scope path fragment
    pub fn path_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.path_fragment = fragment.into();
        self
    }

    /// Set the canonical credential header name
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    /// Set the relay endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.relay.endpoint = endpoint.into();
        self
    }

    /// Set the relay API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.relay.api_key = key.into();
        self
    }

    /// Set the relay timeout
    pub fn relay_timeout(mut self, timeout: Duration) -> Self {
        self.relay.timeout = timeout;
        self
    }

    /// Set the completion policy
    pub fn completion(mut self, policy: CompletionPolicy) -> Self {
        self.completion = policy;
        self
    }

    /// Enable/disable the clipboard write
    pub fn copy_to_clipboard(mut self, enabled: bool) -> Self {
        self.notification.copy_to_clipboard = enabled;
        self
    }

    /// Check the config is usable
    pub fn validate(&self) -> Result<()> {
        if self.path_fragment.is_empty() {
            return Err(Error::config("path_fragment must not be empty"));
        }
        if self.header_name.trim().is_empty() {
            return Err(Error::config("header_name must not be empty"));
        }
        self.relay.validate()
    }
}

/// Remote store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// HTTPS endpoint receiving `{"token": ...}`
    pub endpoint: String,
    /// Value of the `X-API-Key` header
    pub api_key: String,
    /// Single-attempt timeout
    #[serde(with = "duration_ms", rename = "timeout_ms")]
    pub timeout: Duration,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RelayConfig {
    /// Parsed endpoint URL
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::config(format!(
                "relay endpoint must be http(s), got '{}'",
                other
            ))),
        }
    }

    /// Check relay settings
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::config("relay endpoint is not set"));
        }
        self.endpoint_url()?;
        if self.api_key.is_empty() {
            return Err(Error::config("relay api_key is not set"));
        }
        if self.timeout.is_zero() {
            return Err(Error::config("relay timeout must be positive"));
        }
        Ok(())
    }
}

/// When the interception session is released after a credential is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Wait for the relay to settle, then a grace delay for the outcome
    /// notification to be delivered
    AfterRelay {
        #[serde(with = "duration_ms", rename = "grace_ms")]
        grace: Duration,
    },
    /// Release at once; the relay runs detached
    Immediate,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        CompletionPolicy::AfterRelay {
            grace: Duration::from_secs(1),
        }
    }
}

/// Local feedback settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Notification title
    pub title: String,
    /// Characters of the credential shown in the capture notification
    pub preview_chars: usize,
    /// Write the credential to the clipboard on capture
    pub copy_to_clipboard: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: "Token Relay".to_string(),
            preview_chars: 50,
            copy_to_clipboard: true,
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
