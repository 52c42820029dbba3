// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Capture and relay-outcome feedback

use std::sync::Arc;

use super::{Clipboard, NotificationEvent, Notifier};
use crate::config::NotificationConfig;
use crate::intercept::Credential;
use crate::relay::RelayResult;

/// Operator feedback for one hook: clipboard plus two kinds of notification
#[derive(Clone)]
pub struct LocalSink {
    clipboard: Arc<dyn Clipboard>,
    notifier: Arc<dyn Notifier>,
    config: NotificationConfig,
}

impl LocalSink {
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        notifier: Arc<dyn Notifier>,
        config: NotificationConfig,
    ) -> Self {
        Self {
            clipboard,
            notifier,
            config,
        }
    }

    /// Immediate feedback once a credential is in hand
    ///
    /// Only a preview of the value reaches the notification. Clipboard
    /// backends may block, so the write runs on the blocking pool and only
    /// this invocation waits for it.
    pub async fn on_capture(&self, credential: &Credential) {
        if self.config.copy_to_clipboard {
            let clipboard = self.clipboard.clone();
            let text = credential.as_str().to_string();
            match tokio::task::spawn_blocking(move || clipboard.write(&text)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "Clipboard write failed"),
                Err(e) => tracing::warn!(error = %e, "Clipboard task failed"),
            }
        }

        self.post(NotificationEvent::new(
            &self.config.title,
            "Authorization captured",
            format!("Token: {}", credential.preview(self.config.preview_chars)),
        ));
    }

    /// Second notification once the relay settled
    pub fn on_relay(&self, credential: &Credential, result: &RelayResult) {
        let event = match result {
            RelayResult::Success { .. } => NotificationEvent::new(
                &self.config.title,
                "Authorization captured and relayed",
                format!("Token length: {}", credential.len()),
            ),
            RelayResult::Failure(err) => NotificationEvent::new(
                &self.config.title,
                "Authorization captured (relay failed)",
                format!("Reason: {}", err),
            ),
        };
        self.post(event);
    }

    fn post(&self, event: NotificationEvent) {
        match self.notifier.post(&event) {
            Ok(()) => tracing::debug!(subtitle = %event.subtitle, "Notification posted"),
            Err(e) => tracing::warn!(error = %e, "Notification failed"),
        }
    }
}
