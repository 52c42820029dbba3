// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for tokenrelay
//!
//! Every error in the capture pipeline is local: it is caught where it
//! happens, logged, and turned into an outcome. Nothing here is fatal to
//! the interception session.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for tokenrelay operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tokenrelay
#[derive(Error, Debug)]
pub enum Error {
    /// Network-level failure talking to the relay endpoint
    #[error("transport error: {0}")]
    RelayTransport(String),

    /// Relay call exceeded its time budget
    #[error("transport error: timed out after {}ms", .after.as_millis())]
    RelayTimeout { after: Duration },

    /// Relay answered with something that is not the expected envelope
    #[error("malformed response")]
    RelayProtocol { status: u16, body: String },

    /// Relay answered with `success: false`
    #[error("{message}")]
    RelayRejected { message: String },

    /// Clipboard or notification sink failed
    #[error("{sink} sink failed: {reason}")]
    Sink { sink: &'static str, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client failure outside of a relay call (client construction)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a sink error
    pub fn sink(sink: &'static str, reason: impl Into<String>) -> Self {
        Error::Sink {
            sink,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a transport error from any displayable cause
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        Error::RelayTransport(cause.to_string())
    }

    /// Classify a reqwest failure from a relay call
    pub fn from_relay(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Error::RelayTimeout { after: timeout }
        } else {
            Error::RelayTransport(err.to_string())
        }
    }

    /// Check if this is a transport-level relay failure (including timeouts)
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::RelayTransport(_) | Error::RelayTimeout { .. })
    }

    /// Check if the relay answered but the answer was unusable or negative
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            Error::RelayProtocol { .. } | Error::RelayRejected { .. }
        )
    }

    /// Check if this is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::RelayTimeout { .. })
    }

    /// Check if a later invocation could plausibly succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::RelayTransport(_) | Error::RelayTimeout { .. } | Error::Sink { .. }
        )
    }

    /// HTTP status of the relay response, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::RelayProtocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_reason_prefix() {
        let err = Error::transport("connection refused");
        assert!(err.is_transport());
        assert!(err.to_string().starts_with("transport error"));

        let err = Error::RelayTimeout {
            after: Duration::from_secs(10),
        };
        assert!(err.is_timeout());
        assert!(err.is_transport());
        assert_eq!(err.to_string(), "transport error: timed out after 10000ms");
    }

    #[test]
    fn test_protocol_errors() {
        let err = Error::RelayProtocol {
            status: 502,
            body: "<html>".to_string(),
        };
        assert!(err.is_protocol());
        assert!(!err.is_recoverable());
        assert_eq!(err.status_code(), Some(502));
        assert_eq!(err.to_string(), "malformed response");

        let err = Error::RelayRejected {
            message: "duplicate token".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate token");
    }

    #[test]
    fn test_sink_error() {
        let err = Error::sink("clipboard", "no display");
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "clipboard sink failed: no display");
    }
}
