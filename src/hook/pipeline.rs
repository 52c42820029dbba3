// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Credential capture-and-relay pipeline
//!
//! Matcher gates everything. The extractor and the capture feedback run
//! synchronously; the relay runs asynchronously and is followed by a
//! second notification with its outcome. The coordinator decides when the
//! session guard is released.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::task::JoinHandle;

use super::clock::{Clock, TokioClock};
use super::coordinator::{Coordinator, Phase};
use super::guard::CompletionGuard;
use crate::config::{CompletionPolicy, HookConfig};
use crate::error::{Error, Result};
use crate::intercept::{Credential, Extraction, Extractor, InterceptedRequest, Matcher};
use crate::relay::{Relay, RelayClient, RelayResult, RelaySubmission};
use crate::sink::{Clipboard, CommandClipboard, ConsoleNotifier, LocalSink, Notifier};

/// A credential taken from a request
#[derive(Debug, Clone)]
pub struct Capture {
    pub credential: Credential,
    /// Header name it was found under
    pub variant: String,
    pub captured_at: DateTime<Local>,
}

/// What happened to one intercepted request
#[derive(Debug)]
pub enum Outcome {
    /// URL out of scope; nothing was touched
    NoMatch,
    /// In scope, no usable credential header
    CredentialAbsent { present: Vec<String> },
    /// Credential relayed and the relay settled
    Relayed { capture: Capture, result: RelayResult },
    /// Credential handed to a detached relay task; session released at once.
    /// The handle resolves once the relay settled and its notification was
    /// posted. Dropping it does not cancel the relay.
    Detached {
        capture: Capture,
        relay: JoinHandle<RelayResult>,
    },
}

/// Outcome plus the completion phases visited
#[derive(Debug)]
pub struct InvocationReport {
    pub outcome: Outcome,
    pub phases: Vec<Phase>,
}

/// The interception hook
#[derive(Clone)]
pub struct TokenCaptureHook {
    matcher: Matcher,
    extractor: Extractor,
    sink: LocalSink,
    relay: Arc<dyn Relay>,
    clock: Arc<dyn Clock>,
    api_key: String,
    relay_timeout: Duration,
    policy: CompletionPolicy,
}

impl TokenCaptureHook {
    /// Hook with the production collaborators: HTTP relay, platform
    /// clipboard command, console notifications, tokio timers
    pub fn from_config(config: &HookConfig) -> Result<Self> {
        Self::builder(config.clone()).build()
    }

    /// Start a builder; collaborators not set fall back to production ones
    pub fn builder(config: HookConfig) -> HookBuilder {
        HookBuilder {
            config,
            relay: None,
            clipboard: None,
            notifier: None,
            clock: None,
        }
    }

    /// Run one invocation
    ///
    /// `guard` is released exactly once on every path; the returned report
    /// is available only after that.
    pub async fn handle(
        &self,
        request: &InterceptedRequest,
        guard: CompletionGuard,
    ) -> InvocationReport {
        let mut coordinator = Coordinator::new(guard);

        if !self.matcher.matches(&request.url) {
            coordinator.finish();
            return InvocationReport {
                outcome: Outcome::NoMatch,
                phases: coordinator.into_history(),
            };
        }
        tracing::info!(url = %request.url, "Request in scope");

        let (credential, variant) = match self.extractor.extract(&request.headers) {
            Extraction::Found {
                credential,
                variant,
            } => (credential, variant),
            Extraction::Absent { present } => {
                tracing::warn!(headers = ?present, "No credential header found");
                coordinator.finish();
                return InvocationReport {
                    outcome: Outcome::CredentialAbsent { present },
                    phases: coordinator.into_history(),
                };
            }
        };

        let capture = Capture {
            credential,
            variant,
            captured_at: Local::now(),
        };
        tracing::info!(
            header = %capture.variant,
            preview = %capture.credential.preview(8),
            length = capture.credential.len(),
            at = %capture.captured_at.format("%Y-%m-%d %H:%M:%S"),
            "Credential captured"
        );

        self.sink.on_capture(&capture.credential).await;

        let submission = RelaySubmission::new(capture.credential.clone(), self.api_key.clone());

        match self.policy {
            CompletionPolicy::Immediate => {
                let relay = self.relay.clone();
                let sink = self.sink.clone();
                let timeout = self.relay_timeout;
                let handle = tokio::spawn(async move {
                    let result = bounded_submit(relay.as_ref(), &submission, timeout).await;
                    sink.on_relay(&submission.credential, &result);
                    result
                });
                coordinator.finish();
                InvocationReport {
                    outcome: Outcome::Detached {
                        capture,
                        relay: handle,
                    },
                    phases: coordinator.into_history(),
                }
            }
            CompletionPolicy::AfterRelay { grace } => {
                coordinator.relay_started();
                let result =
                    bounded_submit(self.relay.as_ref(), &submission, self.relay_timeout).await;
                self.sink.on_relay(&capture.credential, &result);
                coordinator.relay_settled();

                coordinator.settle(self.clock.as_ref(), grace).await;
                InvocationReport {
                    outcome: Outcome::Relayed { capture, result },
                    phases: coordinator.into_history(),
                }
            }
        }
    }

    /// Run several independent invocations concurrently. No deduplication.
    pub async fn handle_all(
        &self,
        invocations: Vec<(InterceptedRequest, CompletionGuard)>,
    ) -> Vec<InvocationReport> {
        let futures: Vec<_> = invocations
            .into_iter()
            .map(|(request, guard)| async move { self.handle(&request, guard).await })
            .collect();
        futures::future::join_all(futures).await
    }

    /// The URL matcher
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

/// Relay bounded by the configured timeout, whatever the implementation does
async fn bounded_submit(
    relay: &dyn Relay,
    submission: &RelaySubmission,
    timeout: Duration,
) -> RelayResult {
    match tokio::time::timeout(timeout, relay.submit(submission)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Relay did not settle in time");
            RelayResult::Failure(Error::RelayTimeout { after: timeout })
        }
    }
}

/// Builder for [`TokenCaptureHook`]
pub struct HookBuilder {
    config: HookConfig,
    relay: Option<Arc<dyn Relay>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Option<Arc<dyn Clock>>,
}

impl HookBuilder {
    /// Use a custom relay
    pub fn relay(mut self, relay: Arc<dyn Relay>) -> Self {
        self.relay = Some(relay);
        self
    }

    /// Use a custom clipboard
    pub fn clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    /// Use a custom notifier
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Use a custom clock
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the config and assemble the hook
    pub fn build(self) -> Result<TokenCaptureHook> {
        let config = self.config;
        config.validate()?;

        let relay: Arc<dyn Relay> = match self.relay {
            Some(relay) => relay,
            None => Arc::new(RelayClient::from_config(&config.relay)?),
        };
        let clipboard: Arc<dyn Clipboard> = match self.clipboard {
            Some(clipboard) => clipboard,
            None => Arc::new(CommandClipboard::detect()),
        };
        let notifier: Arc<dyn Notifier> = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(ConsoleNotifier),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(TokioClock),
        };

        Ok(TokenCaptureHook {
            matcher: Matcher::new(config.path_fragment.clone()),
            extractor: Extractor::new(&config.header_name),
            sink: LocalSink::new(clipboard, notifier, config.notification.clone()),
            relay,
            clock,
            api_key: config.relay.api_key.clone(),
            relay_timeout: config.relay.timeout,
            policy: config.completion,
        })
    }
}
