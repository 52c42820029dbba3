// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Notifier that prints to the terminal

use std::io::Write;

use super::{NotificationEvent, Notifier};
use crate::error::{Error, Result};

/// Prints notifications to stderr, one block per event
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn post(&self, event: &NotificationEvent) -> Result<()> {
        let mut stderr = std::io::stderr().lock();
        writeln!(
            stderr,
            "[{}] {}\n    {}",
            event.title, event.subtitle, event.body
        )
        .map_err(|e| Error::sink("notification", e.to_string()))
    }
}
