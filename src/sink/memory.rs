// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory sinks

use std::sync::Arc;

use parking_lot::RwLock;

use super::{Clipboard, NotificationEvent, Notifier};
use crate::error::{Error, Result};

/// Records every clipboard write and notification
///
/// Clones share the same buffers, so one instance can be handed to the hook
/// and another kept for inspection.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    clipboard: Arc<RwLock<Vec<String>>>,
    notifications: Arc<RwLock<Vec<NotificationEvent>>>,
    fail_clipboard: bool,
    fail_notifications: bool,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose writes fail (after recording nothing)
    pub fn failing() -> Self {
        Self {
            fail_clipboard: true,
            fail_notifications: true,
            ..Self::default()
        }
    }

    /// Clipboard writes so far
    pub fn clipboard_writes(&self) -> Vec<String> {
        self.clipboard.read().clone()
    }

    /// Notifications so far, in posting order
    pub fn notifications(&self) -> Vec<NotificationEvent> {
        self.notifications.read().clone()
    }
}

impl Clipboard for RecordingSink {
    fn write(&self, text: &str) -> Result<()> {
        if self.fail_clipboard {
            return Err(Error::sink("clipboard", "recording sink set to fail"));
        }
        self.clipboard.write().push(text.to_string());
        Ok(())
    }
}

impl Notifier for RecordingSink {
    fn post(&self, event: &NotificationEvent) -> Result<()> {
        if self.fail_notifications {
            return Err(Error::sink("notification", "recording sink set to fail"));
        }
        self.notifications.write().push(event.clone());
        Ok(())
    }
}

/// Clipboard that discards writes
#[derive(Debug, Default, Clone)]
pub struct NoopClipboard;

impl Clipboard for NoopClipboard {
    fn write(&self, _text: &str) -> Result<()> {
        Ok(())
    }
}
