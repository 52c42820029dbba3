// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Local feedback sinks: clipboard and notifications
//!
//! Both are fire-and-forget surfaces owned by the host. A failing sink is
//! logged and otherwise ignored.

mod command;
mod console;
mod local;
mod memory;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use command::CommandClipboard;
pub use console::ConsoleNotifier;
pub use local::LocalSink;
pub use memory::{NoopClipboard, RecordingSink};

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

impl NotificationEvent {
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            body: body.into(),
        }
    }
}

/// System clipboard
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents
    fn write(&self, text: &str) -> Result<()>;
}

/// Notification surface
pub trait Notifier: Send + Sync {
    /// Post a notification. There is no delivery confirmation.
    fn post(&self, event: &NotificationEvent) -> Result<()>;
}
