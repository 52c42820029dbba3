// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Relay payload and response envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::intercept::Credential;

/// What gets sent to the remote store. Built fresh per invocation.
#[derive(Debug, Clone)]
pub struct RelaySubmission {
    pub credential: Credential,
    pub api_key: String,
}

impl RelaySubmission {
    pub fn new(credential: Credential, api_key: impl Into<String>) -> Self {
        Self {
            credential,
            api_key: api_key.into(),
        }
    }

    /// JSON request body, `{"token": "<credential>"}`
    pub fn body(&self) -> Value {
        serde_json::json!({ "token": self.credential.as_str() })
    }
}

/// Response body of the remote store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayEnvelope {
    pub success: bool,
    /// Absent and `null` both read as no message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RelayEnvelope {
    /// Parse a raw response body
    pub fn parse(status: u16, body: &[u8]) -> Result<Self, Error> {
        serde_json::from_slice(body).map_err(|_| Error::RelayProtocol {
            status,
            body: String::from_utf8_lossy(&body[..body.len().min(512)]).into_owned(),
        })
    }

    /// Classify the envelope
    pub fn into_result(self) -> RelayResult {
        if self.success {
            RelayResult::Success {
                data: self.data.unwrap_or(Value::Null),
            }
        } else {
            RelayResult::Failure(Error::RelayRejected {
                message: self.message.unwrap_or_default(),
            })
        }
    }
}

/// Outcome of one relay attempt
#[derive(Debug)]
pub enum RelayResult {
    /// Stored remotely; `data` is the envelope's `data` (null when absent)
    Success { data: Value },
    /// Not stored; the error is one of the relay variants
    Failure(Error),
}

impl RelayResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RelayResult::Success { .. })
    }

    /// Human-readable failure reason
    pub fn reason(&self) -> Option<String> {
        match self {
            RelayResult::Success { .. } => None,
            RelayResult::Failure(err) => Some(err.to_string()),
        }
    }

    /// Server data on success
    pub fn data(&self) -> Option<&Value> {
        match self {
            RelayResult::Success { data } => Some(data),
            RelayResult::Failure(_) => None,
        }
    }
}

impl From<Error> for RelayResult {
    fn from(err: Error) -> Self {
        RelayResult::Failure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_submission_body() {
        let submission = RelaySubmission::new(Credential::new("Bearer a\"b").unwrap(), "key");
        assert_eq!(submission.body(), json!({ "token": "Bearer a\"b" }));
    }

    #[test]
    fn test_success_envelope() {
        let result = RelayEnvelope::parse(200, br#"{"success":true,"message":"ok","data":{"id":1}}"#)
            .unwrap()
            .into_result();
        assert_eq!(result.data(), Some(&json!({ "id": 1 })));

        let result = RelayEnvelope::parse(200, br#"{"success":true,"message":"ok"}"#)
            .unwrap()
            .into_result();
        assert_eq!(result.data(), Some(&Value::Null));
    }

    #[test]
    fn test_rejected_envelope() {
        let result = RelayEnvelope::parse(409, br#"{"success":false,"message":"duplicate token"}"#)
            .unwrap()
            .into_result();
        assert!(!result.is_success());
        assert_eq!(result.reason().as_deref(), Some("duplicate token"));
    }

    #[test]
    fn test_null_message_accepted() {
        let result = RelayEnvelope::parse(200, br#"{"success":true,"message":null}"#)
            .unwrap()
            .into_result();
        assert!(result.is_success());

        let result = RelayEnvelope::parse(409, br#"{"success":false,"message":null}"#)
            .unwrap()
            .into_result();
        assert!(!result.is_success());
        assert_eq!(result.reason().as_deref(), Some(""));
    }

    #[test]
    fn test_malformed_envelope() {
        let bodies: [&[u8]; 3] = [b"<html>bad gateway</html>", br#"{"message":"no flag"}"#, b""];
        for body in bodies {
            let err = RelayEnvelope::parse(502, body).unwrap_err();
            assert!(err.is_protocol());
            assert_eq!(err.to_string(), "malformed response");
        }
    }
}
