// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # tokenrelay - Credential Capture Hook
//!
//! A request-interception hook for traffic-inspection hosts. It watches
//! outbound requests to one endpoint, lifts the bearer credential from the
//! request headers, and relays it to a remote store while giving the
//! operator local feedback.
//!
//! ## Pipeline
//!
//! - Matcher: case-sensitive substring test on the URL
//! - Extractor: header lookup over an explicit casing priority list
//! - Local sink: clipboard write plus a capture notification (preview only)
//! - Relay: one authenticated JSON POST, bounded by a timeout
//! - Coordinator: releases the interception session exactly once, after the
//!   relay settled and a grace delay elapsed
//!
//! The observed request is never modified or blocked.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tokenrelay::{CompletionGuard, HookConfig, InterceptedRequest, TokenCaptureHook};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HookConfig::new()
//!         .path_fragment("/remote-control/vehicle/status/")
//!         .endpoint("https://store.example.com/api/store-token")
//!         .api_key("my-key");
//!     let hook = TokenCaptureHook::from_config(&config)?;
//!
//!     let request = InterceptedRequest::new(
//!         "https://device-api.example.com/remote-control/vehicle/status/VIN1",
//!     )
//!     .header("Authorization", "Bearer abc");
//!
//!     let (guard, released) = CompletionGuard::channel();
//!     let report = hook.handle(&request, guard).await;
//!     released.await?;
//!     println!("{:?}", report.outcome);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod hook;
pub mod intercept;
pub mod relay;
pub mod sink;

// Re-exports for convenience

// Config
pub use config::{CompletionPolicy, HookConfig, NotificationConfig, RelayConfig};

// Errors
pub use error::{Error, Result};

// Hook
pub use hook::{
    Capture, Clock, CompletionGuard, Coordinator, HookBuilder, InvocationReport, Outcome,
    Passthrough, Phase, SessionHost, TokenCaptureHook, TokioClock,
};

// Interception
pub use intercept::{Credential, Extraction, Extractor, InterceptedRequest, Matcher};

// Relay
pub use relay::{Relay, RelayClient, RelayEnvelope, RelayResult, RelaySubmission};

// Sinks
pub use sink::{
    Clipboard, CommandClipboard, ConsoleNotifier, LocalSink, NoopClipboard, NotificationEvent,
    Notifier, RecordingSink,
};

/// tokenrelay version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
